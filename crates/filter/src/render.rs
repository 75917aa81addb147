//! Rendering of a [`FilterSpec`] into the filter query string.
//!
//! The output looks like JSON with two deviations: operator keys carry a `$`
//! prefix, and nested filters are spliced into the parent object under dotted
//! keys instead of being nested objects. List elements are separated by `", "`
//! and tags always render as `{"key":"..", "value":".."}`; the server side
//! parser is known to accept exactly this shape.

use convert_case::{Boundary, Case, Converter};
use serde_json::Value;

use crate::spec::{Constraint, FilterSpec};
use crate::value::{FilterValue, Tag};

/// Rendered form of a filter operand
#[derive(Debug, Clone, PartialEq)]
enum Node {
    Str(String),
    Int(i64),
    Bool(bool),
    Array(Vec<Node>),
    Object(Vec<(String, Node)>),
    Tag(Tag),
}

/// One top-level member of the rendered filter
#[derive(Debug, Clone, PartialEq)]
enum Entry {
    /// `"path":{...}`
    Pair(String, Node),
    /// A bare value without a key (top-level tags)
    Literal(Node),
}

impl From<&FilterValue> for Node {
    fn from(value: &FilterValue) -> Self {
        match value {
            FilterValue::String(s) => Node::Str(s.clone()),
            FilterValue::Int(i) => Node::Int(*i),
            FilterValue::Bool(b) => Node::Bool(*b),
            FilterValue::List(items) => Node::Array(items.iter().map(Node::from).collect()),
            FilterValue::Tag(tag) => Node::Tag(tag.clone()),
        }
    }
}

/// Convert a field name to the snake_case form used on the wire.
///
/// Digits stay attached to the word they follow (`Ec2InstanceId` →
/// `ec2_instance_id`).
pub fn to_snake_case(name: &str) -> String {
    Converter::new()
        .set_boundaries(&[
            Boundary::Underscore,
            Boundary::Hyphen,
            Boundary::Space,
            Boundary::LowerUpper,
            Boundary::DigitUpper,
            Boundary::Acronym,
        ])
        .to_case(Case::Snake)
        .convert(name)
}

pub(crate) fn query_str(spec: &FilterSpec) -> String {
    let mut entries = Vec::new();
    collect(spec, None, &mut entries);

    let mut out = String::from("{");
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        match entry {
            Entry::Pair(path, node) => {
                write_str(path, &mut out);
                out.push(':');
                write_node(node, &mut out);
            }
            Entry::Literal(node) => write_node(node, &mut out),
        }
    }
    out.push('}');

    log::trace!("rendered filter: {}", out);
    out
}

fn collect(spec: &FilterSpec, prefix: Option<&str>, out: &mut Vec<Entry>) {
    for (name, constraint) in spec.fields() {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, to_snake_case(name)),
            None => to_snake_case(name),
        };
        match constraint {
            Constraint::Tag(tag) => out.push(Entry::Literal(Node::Tag(tag.clone()))),
            Constraint::Nested(inner) => collect(inner, Some(&path), out),
            Constraint::Operators(pairs) => {
                let members = pairs
                    .iter()
                    .map(|(op, value)| (op.wire_key(), Node::from(value)))
                    .collect();
                out.push(Entry::Pair(path, Node::Object(members)));
            }
        }
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Str(s) => write_str(s, out),
        Node::Int(i) => out.push_str(&i.to_string()),
        Node::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Node::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_node(item, out);
            }
            out.push(']');
        }
        Node::Object(members) => {
            out.push('{');
            for (i, (key, value)) in members.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_str(key, out);
                out.push(':');
                write_node(value, out);
            }
            out.push('}');
        }
        Node::Tag(tag) => {
            out.push_str("{\"key\":");
            write_str(&tag.key, out);
            out.push_str(", \"value\":");
            write_str(&tag.value, out);
            out.push('}');
        }
    }
}

// JSON string encoding, so quotes and backslashes inside values are escaped.
fn write_str(s: &str, out: &mut String) {
    out.push_str(&Value::String(s.to_string()).to_string());
}
