//! HTTP client abstraction for making requests to the Clumio API

use std::sync::Arc;

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::config::ClientOptions;
use crate::error::{ClumioError, Result};

/// Identifies this library to the API
pub const API_CLIENT_HEADER: &str = "x-clumio-api-client";

/// Library version sent with every request
pub const SDK_VERSION_HEADER: &str = "x-clumio-sdk-version";

/// Organizational unit the request acts on behalf of
pub const OU_CONTEXT_HEADER: &str = "x-clumio-organizationalunit-context";

const API_CLIENT_NAME: &str = "clumio-rust-sdk";

/// Shared HTTP client and options handed to every controller
#[derive(Debug, Clone)]
pub struct Fetch {
    http_client: Client,
    options: Arc<ClientOptions>,
}

impl Fetch {
    pub fn new(http_client: Client, options: Arc<ClientOptions>) -> Self {
        Self {
            http_client,
            options,
        }
    }

    /// The options requests are built with
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Create a GET request
    pub fn get(&self, path: &str) -> FetchBuilder<'_> {
        FetchBuilder::new(self, path, Method::GET)
    }

    /// Create a POST request
    pub fn post(&self, path: &str) -> FetchBuilder<'_> {
        FetchBuilder::new(self, path, Method::POST)
    }

    /// Create a PUT request
    pub fn put(&self, path: &str) -> FetchBuilder<'_> {
        FetchBuilder::new(self, path, Method::PUT)
    }

    /// Create a PATCH request
    pub fn patch(&self, path: &str) -> FetchBuilder<'_> {
        FetchBuilder::new(self, path, Method::PATCH)
    }

    /// Create a DELETE request
    pub fn delete(&self, path: &str) -> FetchBuilder<'_> {
        FetchBuilder::new(self, path, Method::DELETE)
    }
}

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    fetch: &'a Fetch,
    path: String,
    method: Method,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    fn new(fetch: &'a Fetch, path: &str, method: Method) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(API_CLIENT_HEADER, HeaderValue::from_static(API_CLIENT_NAME));
        headers.insert(
            SDK_VERSION_HEADER,
            HeaderValue::from_static(env!("CARGO_PKG_VERSION")),
        );

        Self {
            fetch,
            path: path.to_string(),
            method,
            headers,
            query_params: Vec::new(),
            body: None,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ClumioError::invalid_parameters(format!("Invalid header name: {}", name)))?;
        let header_value = HeaderValue::from_str(value).map_err(|_| {
            ClumioError::invalid_parameters(format!("Invalid header value for {}", name))
        })?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Set the versioned media type of the resource
    pub fn accept(mut self, media_type: &'static str) -> Self {
        self.headers.insert(ACCEPT, HeaderValue::from_static(media_type));
        self
    }

    /// Add a query parameter to the request
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a query parameter when a value is present
    pub fn query_opt<T: ToString>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(json);
        Ok(self)
    }

    /// Resolve the request URL against the configured base URL
    fn url(&self) -> Result<Url> {
        let base = self.fetch.options.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}{}", base, self.path))?;

        if !self.query_params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                query_pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Build the request
    fn build(&self) -> Result<RequestBuilder> {
        let options = &self.fetch.options;
        let mut headers = self.headers.clone();

        let auth = HeaderValue::from_str(&format!("Bearer {}", options.api_token))
            .map_err(|_| ClumioError::config("API token is not a valid header value"))?;
        headers.insert(AUTHORIZATION, auth);

        if let Some(ou) = &options.organizational_unit_context {
            let value = HeaderValue::from_str(ou).map_err(|_| {
                ClumioError::config("organizational unit context is not a valid header value")
            })?;
            headers.insert(OU_CONTEXT_HEADER, value);
        }

        for (name, value) in &options.custom_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ClumioError::config(format!("Invalid header name: {}", name)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| ClumioError::config(format!("Invalid header value for {}", name)))?;
            headers.insert(header_name, header_value);
        }

        let mut req = self
            .fetch
            .http_client
            .request(self.method.clone(), self.url()?)
            .headers(headers);

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    /// Send the request, retrying connection-level failures with backoff.
    ///
    /// HTTP error statuses are returned as responses and never retried.
    pub async fn send(&self) -> Result<Response> {
        let policy = &self.fetch.options.retry;
        let mut attempt = 1;

        loop {
            debug!("{} {} (attempt {})", self.method, self.path, attempt);
            match self.build()?.send().await {
                Ok(response) => return Ok(response),
                Err(e) if attempt < policy.max_attempts && is_retryable(&self.method, &e) => {
                    let delay = policy.delay_for(attempt);
                    warn!(
                        "{} {} failed ({}), retrying in {:?}",
                        self.method, self.path, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(ClumioError::Http(e)),
            }
        }
    }

    /// Send the request and return the body of a successful response
    async fn send_for_text(&self) -> Result<String> {
        let response = self.send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            warn!("{} {} returned {}", self.method, self.path, status);
            return Err(ClumioError::from_response_body(status, error_text));
        }

        Ok(response.text().await?)
    }

    /// Execute the request and parse the response as JSON
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T> {
        let body = self.send_for_text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| ClumioError::Deserialization(e.to_string()))
    }

    /// Execute the request, ignoring any response body
    pub async fn execute_empty(&self) -> Result<()> {
        self.send_for_text().await.map(|_| ())
    }
}

/// Join a collection path and a resource id, escaping the id
pub(crate) fn resource_path(collection: &str, id: &str) -> Result<String> {
    if id.trim().is_empty() {
        return Err(ClumioError::invalid_parameters(format!(
            "an id is required for {}",
            collection
        )));
    }
    Ok(format!("{}/{}", collection, urlencoding::encode(id)))
}

/// Whether a transport error happened before the request reached the server
pub fn is_connection_error(error: &reqwest::Error) -> bool {
    error.is_connect()
}

// Timeouts are only replayed for GET.
fn is_retryable(method: &Method, error: &reqwest::Error) -> bool {
    is_connection_error(error) || (error.is_timeout() && *method == Method::GET)
}

/// A [`Fetch`] against a mock server, without retries
#[cfg(test)]
pub(crate) fn test_fetch(base_url: &str) -> Fetch {
    let options = ClientOptions::default()
        .with_base_url(base_url)
        .with_api_token("fake-token")
        .with_retry(crate::config::RetryPolicy::none());
    Fetch::new(Client::new(), Arc::new(options))
}
