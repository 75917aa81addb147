//! Values that can appear on the right-hand side of an operator

use serde_json::Value;

use crate::error::FilterError;

/// A cloud-provider resource tag, matched as a literal `{"key", "value"}` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Recognize the wire shape `{"Key": k, "Value": v}`.
    ///
    /// Only an object with exactly those two keys (case-sensitive) qualifies.
    /// Returns `Ok(None)` for any other object so callers can fall through.
    pub fn from_json(value: &Value) -> Result<Option<Self>, FilterError> {
        let Some(map) = value.as_object() else {
            return Ok(None);
        };
        if map.len() != 2 || !map.contains_key("Key") || !map.contains_key("Value") {
            return Ok(None);
        }
        match (&map["Key"], &map["Value"]) {
            (Value::String(key), Value::String(value)) => Ok(Some(Tag::new(key, value))),
            (key, value) => Err(FilterError::unsupported(format!(
                "tag with non-string members ({}, {})",
                json_type_name(key),
                json_type_name(value)
            ))),
        }
    }
}

/// Operand of a filter operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    String(String),
    Bool(bool),
    Int(i64),
    List(Vec<FilterValue>),
    Tag(Tag),
}

impl FilterValue {
    /// Build a list value from anything convertible
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<FilterValue>,
    {
        FilterValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::String(value)
    }
}

impl From<&String> for FilterValue {
    fn from(value: &String) -> Self {
        FilterValue::String(value.clone())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Int(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Int(i64::from(value))
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        FilterValue::Int(i64::from(value))
    }
}

impl From<Tag> for FilterValue {
    fn from(value: Tag) -> Self {
        FilterValue::Tag(value)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        FilterValue::list(values)
    }
}

impl TryFrom<Value> for FilterValue {
    type Error = FilterError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        FilterValue::try_from(&value)
    }
}

impl TryFrom<&Value> for FilterValue {
    type Error = FilterError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(FilterValue::String(s.clone())),
            Value::Bool(b) => Ok(FilterValue::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(FilterValue::Int)
                .ok_or_else(|| FilterError::unsupported(format!("number {}", n))),
            Value::Array(items) => items
                .iter()
                .map(FilterValue::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(FilterValue::List),
            Value::Object(_) => match Tag::from_json(value)? {
                Some(tag) => Ok(FilterValue::Tag(tag)),
                None => Err(FilterError::unsupported("object")),
            },
            Value::Null => Err(FilterError::unsupported("null")),
        }
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
