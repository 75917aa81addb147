//! Filter specifications and their constraints

use serde_json::Value;

use crate::error::FilterError;
use crate::operator::Operator;
use crate::render;
use crate::value::{json_type_name, FilterValue, Tag};

/// What a single filter field is constrained to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Operator → operand pairs, rendered as `{"$op": value, ...}`
    Operators(Vec<(Operator, FilterValue)>),

    /// A sub-resource filter, flattened into dotted paths
    Nested(FilterSpec),

    /// A literal tag record
    Tag(Tag),
}

impl Constraint {
    /// A single operator constraint
    pub fn op(operator: Operator, value: impl Into<FilterValue>) -> Self {
        Constraint::Operators(vec![(operator, value.into())])
    }

    /// Several operator constraints on the same field
    pub fn operators<I, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Operator, V)>,
        V: Into<FilterValue>,
    {
        Constraint::Operators(pairs.into_iter().map(|(op, v)| (op, v.into())).collect())
    }

    /// A field that is present but unconstrained, rendered as `{}`
    pub fn empty() -> Self {
        Constraint::Operators(Vec::new())
    }

    /// Equality constraint
    pub fn eq(value: impl Into<FilterValue>) -> Self {
        Constraint::op(Operator::Eq, value)
    }

    /// Membership constraint
    pub fn in_list<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<FilterValue>,
    {
        Constraint::op(Operator::In, FilterValue::list(values))
    }

    /// Substring/collection containment constraint
    pub fn contains(value: impl Into<FilterValue>) -> Self {
        Constraint::op(Operator::Contains, value)
    }

    /// Add another operator to an operator constraint.
    ///
    /// Nested and tag constraints are left unchanged.
    pub fn and(self, operator: Operator, value: impl Into<FilterValue>) -> Self {
        match self {
            Constraint::Operators(mut pairs) => {
                let value = value.into();
                match pairs.iter_mut().find(|(existing, _)| *existing == operator) {
                    Some(slot) => slot.1 = value,
                    None => pairs.push((operator, value)),
                }
                Constraint::Operators(pairs)
            }
            other => other,
        }
    }

    /// Build a constraint from a JSON object such as `{"eq": "abc"}` or
    /// `{"Key": "env", "Value": "prod"}`.
    ///
    /// An object keyed only by field names whose values are constraint
    /// objects, e.g. `{"Id": {"all": ["t1"]}}`, becomes a nested filter.
    pub fn from_json(value: &Value) -> Result<Self, FilterError> {
        if let Some(tag) = Tag::from_json(value)? {
            return Ok(Constraint::Tag(tag));
        }
        let map = value
            .as_object()
            .ok_or_else(|| FilterError::unsupported(json_type_name(value)))?;
        if is_nested_filter(map)? {
            return Ok(Constraint::Nested(FilterSpec::from_json(value)?));
        }
        let mut pairs = Vec::with_capacity(map.len());
        for (token, operand) in map {
            pairs.push((Operator::parse(token), FilterValue::try_from(operand)?));
        }
        Ok(Constraint::Operators(pairs))
    }
}

// Every key is a field name rather than an operator, and every value is a
// constraint object other than a tag.
fn is_nested_filter(map: &serde_json::Map<String, Value>) -> Result<bool, FilterError> {
    if map.is_empty() {
        return Ok(false);
    }
    for (token, operand) in map {
        if Operator::parse(token).is_known() || !operand.is_object() {
            return Ok(false);
        }
        if Tag::from_json(operand)?.is_some() {
            return Ok(false);
        }
    }
    Ok(true)
}

impl From<Tag> for Constraint {
    fn from(tag: Tag) -> Self {
        Constraint::Tag(tag)
    }
}

impl From<FilterSpec> for Constraint {
    fn from(spec: FilterSpec) -> Self {
        Constraint::Nested(spec)
    }
}

/// An ordered set of field constraints for one list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    fields: Vec<(String, Constraint)>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. Setting the same field twice keeps the latest constraint
    /// in the original position.
    pub fn field(mut self, name: impl Into<String>, constraint: impl Into<Constraint>) -> Self {
        let name = name.into();
        let constraint = constraint.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = constraint,
            None => self.fields.push((name, constraint)),
        }
        self
    }

    /// Build a filter from a JSON object mapping field names to constraint
    /// objects, see [`Constraint::from_json`].
    pub fn from_json(value: &Value) -> Result<Self, FilterError> {
        let map = value
            .as_object()
            .ok_or_else(|| FilterError::unsupported(json_type_name(value)))?;
        let mut spec = FilterSpec::new();
        for (name, constraint) in map {
            spec = spec.field(name.as_str(), Constraint::from_json(constraint)?);
        }
        Ok(spec)
    }

    /// Set a field only when a constraint is given
    pub fn set(self, name: impl Into<String>, constraint: Option<Constraint>) -> Self {
        match constraint {
            Some(constraint) => self.field(name, constraint),
            None => self,
        }
    }

    /// Set a nested sub-filter
    pub fn nested(self, name: impl Into<String>, spec: FilterSpec) -> Self {
        self.field(name, Constraint::Nested(spec))
    }

    /// Set a nested sub-filter from a typed filter, when given
    pub fn set_nested<F: FilterTypes>(self, name: impl Into<String>, filter: Option<&F>) -> Self {
        match filter {
            Some(filter) => self.nested(name, filter.to_filter_spec()),
            None => self,
        }
    }

    /// Set a tag field
    pub fn tag(
        self,
        name: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.field(name, Tag::new(key, value))
    }

    /// The explicitly set fields, in insertion order
    pub fn fields(&self) -> &[(String, Constraint)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render the filter as the value of the `filter` query parameter.
    pub fn query_str(&self) -> String {
        render::query_str(self)
    }
}

/// A per-resource filter declaration.
///
/// Implementors list the fields a resource accepts; rendering is shared.
pub trait FilterTypes {
    /// The explicitly set fields of this filter
    fn to_filter_spec(&self) -> FilterSpec;

    /// Render the filter as the value of the `filter` query parameter.
    fn query_str(&self) -> String {
        self.to_filter_spec().query_str()
    }
}

impl FilterTypes for FilterSpec {
    fn to_filter_spec(&self) -> FilterSpec {
        self.clone()
    }

    fn query_str(&self) -> String {
        render::query_str(self)
    }
}
