//! Error handling for the Clumio Rust client

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// One entry of the `errors` array returned by the API
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ApiErrorItem {
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
    pub error_info: Option<Value>,
}

/// Structured error body returned by the API on non-success statuses
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ApiErrorDetails {
    pub errors: Vec<ApiErrorItem>,
}

impl fmt::Display for ApiErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|item| match (item.error_code, &item.error_message) {
                (Some(code), Some(message)) => format!("Code: {}, Message: {}", code, message),
                (Some(code), None) => format!("Code: {}", code),
                (None, Some(message)) => format!("Message: {}", message),
                (None, None) => "Unknown error".to_string(),
            })
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Unified error type for the Clumio Rust client
#[derive(Error, Debug)]
pub enum ClumioError {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The API answered with a structured error body
    #[error("API error: {details} (Status: {status})")]
    ApiError {
        details: ApiErrorDetails,
        status: reqwest::StatusCode,
    },

    /// The API answered with an error body that could not be parsed
    #[error("API error (unparsed): {message} (Status: {status})")]
    UnparsedApiError {
        message: String,
        status: reqwest::StatusCode,
    },

    /// A response body did not match the expected model
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// A `_next` link did not carry a `start` parameter
    #[error("Malformed pagination link: {0}")]
    MalformedLink(String),

    /// Filter construction errors
    #[error("Filter error: {0}")]
    Filter(#[from] clumio_rust_filter::FilterError),

    /// Invalid request parameters
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClumioError {
    /// Create a new invalid parameters error
    pub fn invalid_parameters<T: fmt::Display>(msg: T) -> Self {
        ClumioError::InvalidParameters(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        ClumioError::Config(msg.to_string())
    }

    /// HTTP status of an API error, if this is one
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            ClumioError::ApiError { status, .. } | ClumioError::UnparsedApiError { status, .. } => {
                Some(*status)
            }
            ClumioError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Build an error from a non-success response body, preferring the
    /// structured form when it parses.
    pub(crate) fn from_response_body(status: reqwest::StatusCode, body: String) -> Self {
        match serde_json::from_str::<ApiErrorDetails>(&body) {
            Ok(details) => ClumioError::ApiError { details, status },
            Err(_) => ClumioError::UnparsedApiError {
                message: body,
                status,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ClumioError>;
