//! Wire-level request specification

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::HttpMethod;

/// Timeout applied to every check request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Complete specification for an HTTP request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Fully resolved target URL
    pub url: String,
    /// JSON payload sent as the request body, POST only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl RequestSpec {
    /// Creates a GET request for the given URL.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            payload: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates a POST request carrying a JSON payload.
    #[must_use]
    pub fn post(url: impl Into<String>, payload: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            payload: Some(payload),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Validates the URL and returns the parsed version if valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed.
    pub fn parse_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.url)
    }
}
