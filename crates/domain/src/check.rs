//! Declarative check specifications.
//!
//! A [`CheckSpec`] describes one smoke check: the request to issue and the
//! status code that makes it pass. Specs are resolved against a base URL
//! into wire-level requests when the runner executes them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::request::{DEFAULT_TIMEOUT, HttpMethod, RequestSpec};

/// Specification of a single smoke check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckSpec {
    /// Human-readable name shown in progress output.
    pub name: String,
    /// HTTP method to issue.
    pub method: HttpMethod,
    /// Path appended to the base URL.
    pub endpoint: String,
    /// Status code the response must carry for the check to pass.
    pub expected_status: u16,
    /// JSON payload for POST checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl CheckSpec {
    /// Creates a GET check.
    #[must_use]
    pub fn get(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        expected_status: u16,
    ) -> Self {
        Self {
            name: name.into(),
            method: HttpMethod::Get,
            endpoint: endpoint.into(),
            expected_status,
            payload: None,
        }
    }

    /// Creates a POST check carrying a JSON payload.
    #[must_use]
    pub fn post(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        expected_status: u16,
        payload: Value,
    ) -> Self {
        Self {
            name: name.into(),
            method: HttpMethod::Post,
            endpoint: endpoint.into(),
            expected_status,
            payload: Some(payload),
        }
    }

    /// Resolves this check against a base URL into a wire-level request.
    #[must_use]
    pub fn to_request(&self, base_url: &str) -> RequestSpec {
        RequestSpec {
            method: self.method,
            url: join_url(base_url, &self.endpoint),
            payload: self.payload.clone(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Joins a base URL and an endpoint path with exactly one separating slash.
///
/// Trailing slashes on the endpoint are preserved.
#[must_use]
pub fn join_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_join_url_single_separator() {
        assert_eq!(join_url("http://host", "api/"), "http://host/api/");
        assert_eq!(join_url("http://host/", "api/"), "http://host/api/");
        assert_eq!(join_url("http://host/", "/api/status"), "http://host/api/status");
        assert_eq!(join_url("http://host", "api/status"), "http://host/api/status");
    }

    #[test]
    fn test_get_check_to_request() {
        let spec = CheckSpec::get("Root API Endpoint", "api/", 200);
        let request = spec.to_request("http://host");

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "http://host/api/");
        assert!(request.payload.is_none());
        assert_eq!(request.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_post_check_keeps_payload() {
        let payload = json!({"client_name": "test_client_120000"});
        let spec = CheckSpec::post("Create Status Check", "api/status", 200, payload.clone());
        let request = spec.to_request("http://host/");

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "http://host/api/status");
        assert_eq!(request.payload, Some(payload));
    }
}
