use thiserror::Error;

/// Errors raised while building a filter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unsupported filter value type: {found}")]
    UnsupportedValueType { found: String },
}

impl FilterError {
    pub fn unsupported<T: std::fmt::Display>(found: T) -> Self {
        Self::UnsupportedValueType {
            found: found.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
