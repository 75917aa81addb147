//! Clumio Rust Client Library
//!
//! A Rust client for the Clumio REST API, providing access to organizational
//! units, policy rules, AWS connection groups, MSSQL hosts, tasks and report
//! downloads. List endpoints take typed filters that are rendered into the
//! API's `filter` query parameter.

pub mod config;
pub mod connection_groups;
pub mod error;
pub mod fetch;
pub mod hosts;
pub mod organizational_units;
pub mod pagination;
pub mod policy_rules;
pub mod reports;
pub mod tasks;
pub mod types;

/// Filter construction and rendering
pub use clumio_rust_filter as filter;

use std::sync::Arc;

use reqwest::Client;

use crate::config::ClientOptions;
use crate::connection_groups::AwsConnectionGroupsController;
use crate::error::Result;
use crate::fetch::Fetch;
use crate::hosts::HostsController;
use crate::organizational_units::OrganizationalUnitsController;
use crate::policy_rules::PolicyRulesController;
use crate::reports::ReportDownloadsController;
use crate::tasks::TasksController;

/// The main entry point for the Clumio Rust client
#[derive(Debug, Clone)]
pub struct Clumio {
    fetch: Fetch,
}

impl Clumio {
    /// Create a new client against the default region
    ///
    /// # Arguments
    ///
    /// * `api_token` - The bearer token of your Clumio account
    ///
    /// # Example
    ///
    /// ```
    /// use clumio_rust::Clumio;
    ///
    /// # fn main() -> clumio_rust::error::Result<()> {
    /// let clumio = Clumio::new("your-api-token")?;
    /// let tasks = clumio.tasks();
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(api_token: &str) -> Result<Self> {
        Self::new_with_options(ClientOptions::default().with_api_token(api_token))
    }

    /// Create a new client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use clumio_rust::{Clumio, config::ClientOptions};
    ///
    /// # fn main() -> clumio_rust::error::Result<()> {
    /// let options = ClientOptions::default()
    ///     .with_base_url("https://eu-central-1.api.clumio.com")
    ///     .with_api_token("your-api-token")
    ///     .with_organizational_unit_context("your-ou-id");
    /// let clumio = Clumio::new_with_options(options)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new_with_options(options: ClientOptions) -> Result<Self> {
        options.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        log::debug!("Clumio client created for {}", options.base_url);

        Ok(Self {
            fetch: Fetch::new(http_client, Arc::new(options)),
        })
    }

    /// Create a new client from the `CLUMIO_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new_with_options(ClientOptions::from_env()?)
    }

    /// The options this client was built with
    pub fn options(&self) -> &ClientOptions {
        self.fetch.options()
    }

    pub fn organizational_units(&self) -> OrganizationalUnitsController {
        OrganizationalUnitsController::new(self.fetch.clone())
    }

    pub fn policy_rules(&self) -> PolicyRulesController {
        PolicyRulesController::new(self.fetch.clone())
    }

    pub fn aws_connection_groups(&self) -> AwsConnectionGroupsController {
        AwsConnectionGroupsController::new(self.fetch.clone())
    }

    pub fn hosts(&self) -> HostsController {
        HostsController::new(self.fetch.clone())
    }

    pub fn tasks(&self) -> TasksController {
        TasksController::new(self.fetch.clone())
    }

    pub fn report_downloads(&self) -> ReportDownloadsController {
        ReportDownloadsController::new(self.fetch.clone())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::{ClientOptions, RetryPolicy};
    pub use crate::error::{ClumioError, Result};
    pub use crate::filter::{Constraint, FilterSpec, FilterTypes, Operator, Tag};
    pub use crate::pagination::Paginator;
    pub use crate::types::ListResponse;
    pub use crate::Clumio;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClumioError;

    #[test]
    fn test_new_requires_token() {
        let err = Clumio::new("").unwrap_err();
        assert!(matches!(err, ClumioError::Config(_)));
    }

    #[test]
    fn test_new_uses_default_region() {
        let clumio = Clumio::new("token").unwrap();
        assert_eq!(clumio.options().base_url, config::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_base_url() {
        let options = ClientOptions::default()
            .with_api_token("token")
            .with_base_url("not a url");
        assert!(matches!(
            Clumio::new_with_options(options),
            Err(ClumioError::Url(_))
        ));
    }
}
