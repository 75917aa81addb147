//! Configuration options for the Clumio client

use std::env;
use std::time::Duration;

use crate::error::{ClumioError, Result};

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://us-west-2.api.clumio.com";

/// Environment variable holding the API base URL
pub const ENV_BASE_URL: &str = "CLUMIO_API_BASE_URL";

/// Environment variable holding the API token
pub const ENV_API_TOKEN: &str = "CLUMIO_API_TOKEN";

/// Environment variable holding the organizational unit context
pub const ENV_OU_CONTEXT: &str = "CLUMIO_OU_CONTEXT";

/// Environment variable holding the request timeout in seconds
pub const ENV_REQUEST_TIMEOUT: &str = "CLUMIO_REQUEST_TIMEOUT_SECS";

/// Exponential backoff applied to connection-level failures
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,

    /// Delay before the second attempt
    pub initial_delay: Duration,

    /// Factor applied to the delay after each failed attempt
    pub multiplier: f64,

    /// Upper bound for a single delay
    pub maximum_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            multiplier: 2.0,
            maximum_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Set the total number of attempts
    pub fn with_max_attempts(mut self, value: u32) -> Self {
        self.max_attempts = value;
        self
    }

    /// Set the delay before the second attempt
    pub fn with_initial_delay(mut self, value: Duration) -> Self {
        self.initial_delay = value;
        self
    }

    /// Set the backoff multiplier
    pub fn with_multiplier(mut self, value: f64) -> Self {
        self.multiplier = value;
        self
    }

    /// Set the maximum delay
    pub fn with_maximum_delay(mut self, value: Duration) -> Self {
        self.maximum_delay = value;
        self
    }

    /// Check that the policy describes a usable backoff
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(ClumioError::config("max_attempts should be at least 1"));
        }
        if self.multiplier < 1.0 {
            return Err(ClumioError::config(format!(
                "the multiplier ({}) should be >= 1.0",
                self.multiplier
            )));
        }
        if self.maximum_delay < self.initial_delay {
            return Err(ClumioError::config(format!(
                "the maximum delay ({:?}) should be greater than or equal to the initial delay ({:?})",
                self.maximum_delay, self.initial_delay
            )));
        }
        Ok(())
    }

    /// Delay to wait after the given failed attempt (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        let delay = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);
        if !delay.is_finite() || delay >= self.maximum_delay.as_secs_f64() {
            self.maximum_delay
        } else {
            Duration::from_secs_f64(delay)
        }
    }
}

/// Configuration options for the Clumio client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The base URL of the API
    pub base_url: String,

    /// The bearer token used for authentication
    pub api_token: String,

    /// Organizational unit the requests act on behalf of
    pub organizational_unit_context: Option<String>,

    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Retry policy for connection failures
    pub retry: RetryPolicy,

    /// Extra headers sent with every request
    pub custom_headers: Vec<(String, String)>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: String::new(),
            organizational_unit_context: None,
            request_timeout: Some(Duration::from_secs(30)),
            retry: RetryPolicy::default(),
            custom_headers: Vec::new(),
        }
    }
}

impl ClientOptions {
    /// Load options from the `CLUMIO_*` environment variables.
    ///
    /// `CLUMIO_API_TOKEN` is required; everything else falls back to the
    /// defaults.
    pub fn from_env() -> Result<Self> {
        let api_token = env::var(ENV_API_TOKEN)
            .map_err(|_| ClumioError::config(format!("{} must be set", ENV_API_TOKEN)))?;

        let mut options = Self::default().with_api_token(&api_token);

        if let Ok(base_url) = env::var(ENV_BASE_URL) {
            options = options.with_base_url(&base_url);
        }
        if let Ok(ou) = env::var(ENV_OU_CONTEXT) {
            if !ou.is_empty() {
                options = options.with_organizational_unit_context(&ou);
            }
        }
        if let Ok(timeout) = env::var(ENV_REQUEST_TIMEOUT) {
            let secs = timeout.parse::<u64>().map_err(|_| {
                ClumioError::config(format!(
                    "{} should be a number of seconds, got {:?}",
                    ENV_REQUEST_TIMEOUT, timeout
                ))
            })?;
            options = options.with_request_timeout(Some(Duration::from_secs(secs)));
        }

        Ok(options)
    }

    /// Set the base URL
    pub fn with_base_url(mut self, value: &str) -> Self {
        self.base_url = value.trim_end_matches('/').to_string();
        self
    }

    /// Set the API token
    pub fn with_api_token(mut self, value: &str) -> Self {
        self.api_token = value.to_string();
        self
    }

    /// Set the organizational unit context
    pub fn with_organizational_unit_context(mut self, value: &str) -> Self {
        self.organizational_unit_context = Some(value.to_string());
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the retry policy
    pub fn with_retry(mut self, value: RetryPolicy) -> Self {
        self.retry = value;
        self
    }

    /// Add a header sent with every request
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.custom_headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Check the options before a client is built from them
    pub fn validate(&self) -> Result<()> {
        if self.api_token.is_empty() {
            return Err(ClumioError::config("an API token is required"));
        }
        url::Url::parse(&self.base_url)?;
        self.retry.validate()
    }
}
