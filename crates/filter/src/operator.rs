//! Comparison operators accepted by the filter grammar

use std::fmt;

/// Operator for filter expressions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal to
    Eq,

    /// Not equal to
    NotEq,

    /// Not equal to (short form)
    Neq,

    /// Greater than or equal to
    Gte,

    /// Less than or equal to
    Lte,

    /// Greater than
    Gt,

    /// Less than
    Lt,

    /// Contains (substring)
    Co,

    /// Regular expression match
    Regex,

    /// Contains (collection membership)
    Contains,

    /// Does not contain
    NotContains,

    /// In a list of values
    In,

    /// Not in a list of values
    NotIn,

    /// Contains all values
    All,

    /// Does not contain all values
    NotAll,

    /// Starts with
    BeginsWith,

    /// Contains none of the values
    NotAny,

    /// A token outside the known set. Rendered verbatim, without `$`.
    Other(String),
}

impl Operator {
    /// Every operator the server recognizes, in wire form.
    pub const KNOWN: [&'static str; 17] = [
        "eq",
        "not_eq",
        "neq",
        "gte",
        "lte",
        "co",
        "regex",
        "contains",
        "not_contains",
        "gt",
        "lt",
        "in",
        "not_in",
        "all",
        "begins_with",
        "not_any",
        "not_all",
    ];

    /// Parse an operator token. Known tokens match case-insensitively;
    /// anything else is kept as [`Operator::Other`] with its original casing.
    pub fn parse(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "eq" => Operator::Eq,
            "not_eq" => Operator::NotEq,
            "neq" => Operator::Neq,
            "gte" => Operator::Gte,
            "lte" => Operator::Lte,
            "gt" => Operator::Gt,
            "lt" => Operator::Lt,
            "co" => Operator::Co,
            "regex" => Operator::Regex,
            "contains" => Operator::Contains,
            "not_contains" => Operator::NotContains,
            "in" => Operator::In,
            "not_in" => Operator::NotIn,
            "all" => Operator::All,
            "not_all" => Operator::NotAll,
            "begins_with" => Operator::BeginsWith,
            "not_any" => Operator::NotAny,
            _ => Operator::Other(token.to_string()),
        }
    }

    /// Convert the operator to its token (without the `$` prefix)
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Eq => "eq",
            Operator::NotEq => "not_eq",
            Operator::Neq => "neq",
            Operator::Gte => "gte",
            Operator::Lte => "lte",
            Operator::Gt => "gt",
            Operator::Lt => "lt",
            Operator::Co => "co",
            Operator::Regex => "regex",
            Operator::Contains => "contains",
            Operator::NotContains => "not_contains",
            Operator::In => "in",
            Operator::NotIn => "not_in",
            Operator::All => "all",
            Operator::NotAll => "not_all",
            Operator::BeginsWith => "begins_with",
            Operator::NotAny => "not_any",
            Operator::Other(token) => token,
        }
    }

    /// Whether this operator is part of the recognized set
    pub fn is_known(&self) -> bool {
        !matches!(self, Operator::Other(_))
    }

    /// The key this operator takes in a rendered filter object.
    pub fn wire_key(&self) -> String {
        if self.is_known() {
            format!("${}", self.as_str())
        } else {
            self.as_str().to_string()
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Operator {
    fn from(token: &str) -> Self {
        Operator::parse(token)
    }
}
