//! Smoke-run use case.
//!
//! [`SmokeRunner`] issues the fixed check sequence against a base URL,
//! keeps the pass/fail tally, and reports progress through its ports.

use std::sync::Arc;
use std::time::Instant;

use serde_json::json;
use url::Url;

use probe_domain::{CheckOutcome, CheckSpec, RunTally};

use crate::error::{RunnerError, RunnerResult};
use crate::ports::{Clock, HttpClient, Reporter};

/// Path of the root health endpoint, relative to the base URL.
const ROOT_ENDPOINT: &str = "api/";
/// Path of the status-check resource, relative to the base URL.
const STATUS_ENDPOINT: &str = "api/status";

/// Use case for running the smoke-check sequence.
///
/// Generic over its ports so tests can substitute a mock client, a fixed
/// clock, and a recording reporter.
///
/// # Example
///
/// ```ignore
/// let client = Arc::new(ReqwestHttpClient::new()?);
/// let mut runner = SmokeRunner::new(base_url, client, SystemClock::new(), ConsoleReporter::new())?;
/// let all_passed = runner.run().await;
/// ```
pub struct SmokeRunner<C, K, R>
where
    C: HttpClient,
    K: Clock,
    R: Reporter,
{
    client: Arc<C>,
    clock: K,
    reporter: R,
    base_url: String,
    tally: RunTally,
}

impl<C, K, R> SmokeRunner<C, K, R>
where
    C: HttpClient,
    K: Clock,
    R: Reporter,
{
    /// Creates a runner for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is empty, malformed, or does
    /// not use the http or https scheme.
    pub fn new(
        base_url: impl Into<String>,
        client: Arc<C>,
        clock: K,
        reporter: R,
    ) -> RunnerResult<Self> {
        let base_url = base_url.into();
        validate_base_url(&base_url)?;

        Ok(Self {
            client,
            clock,
            reporter,
            base_url,
            tally: RunTally::new(),
        })
    }

    /// The tally accumulated so far.
    #[must_use]
    pub const fn tally(&self) -> &RunTally {
        &self.tally
    }

    /// The base URL checks are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Runs a single check and records it in the tally.
    ///
    /// Every invocation moves the run counter by exactly one; the passed
    /// counter moves only on a status match. Transport faults become
    /// failed outcomes and never propagate, so a dead endpoint cannot
    /// abort the remaining checks.
    pub async fn run_check(&mut self, spec: &CheckSpec) -> CheckOutcome {
        self.reporter.check_started(&spec.name);

        let request = spec.to_request(&self.base_url);
        let start = Instant::now();

        let outcome = match self.client.execute(&request).await {
            Ok(response) => {
                CheckOutcome::from_response(spec.name.as_str(), spec.expected_status, &response)
            }
            Err(error) => {
                tracing::warn!(check = %spec.name, %error, "request failed");
                CheckOutcome::from_transport_error(
                    spec.name.as_str(),
                    spec.expected_status,
                    error.to_string(),
                    start.elapsed(),
                )
            }
        };

        self.tally.record(outcome.passed);
        self.reporter.check_completed(&outcome);
        outcome
    }

    /// Checks the API root endpoint, expecting 200.
    ///
    /// No body validation beyond the status code.
    pub async fn check_root_endpoint(&mut self) -> bool {
        let spec = CheckSpec::get("Root API Endpoint", ROOT_ENDPOINT, 200);
        self.run_check(&spec).await.passed
    }

    /// Checks the status-check resource: list, then create.
    ///
    /// The create check runs regardless of the list check's outcome; the
    /// result is the AND of both.
    pub async fn check_status_endpoints(&mut self) -> bool {
        let list = CheckSpec::get("Get Status Checks", STATUS_ENDPOINT, 200);
        let list_passed = self.run_check(&list).await.passed;

        let create = CheckSpec::post(
            "Create Status Check",
            STATUS_ENDPOINT,
            200,
            json!({ "client_name": self.client_name() }),
        );
        let create_passed = self.run_check(&create).await.passed;

        list_passed && create_passed
    }

    /// Runs the full smoke sequence and reports the summary.
    ///
    /// Returns true when every check passed.
    pub async fn run(&mut self) -> bool {
        self.reporter.banner(&self.base_url);

        self.check_root_endpoint().await;
        self.check_status_endpoints().await;

        self.reporter.summary(&self.tally);
        self.tally.all_passed()
    }

    /// Collision-avoiding client name for created status checks.
    fn client_name(&self) -> String {
        format!("test_client_{}", self.clock.now().format("%H%M%S"))
    }
}

/// Validates that a base URL is a usable http(s) URL.
fn validate_base_url(base_url: &str) -> RunnerResult<()> {
    if base_url.trim().is_empty() {
        return Err(RunnerError::EmptyBaseUrl);
    }

    let parsed = Url::parse(base_url)
        .map_err(|e| RunnerError::InvalidBaseUrl(format!("{e}: {base_url}")))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(RunnerError::InvalidBaseUrl(format!(
            "unsupported scheme: {}",
            parsed.scheme()
        )));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;
    use std::time::Duration;

    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::ports::HttpClientError;
    use probe_domain::{RequestSpec, ResponseSpec};

    /// Mock HTTP client returning scripted results in order and recording
    /// every request it receives.
    struct MockHttpClient {
        responses: Mutex<Vec<Result<ResponseSpec, HttpClientError>>>,
        requests: Mutex<Vec<RequestSpec>>,
    }

    impl MockHttpClient {
        fn new(responses: Vec<Result<ResponseSpec, HttpClientError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<RequestSpec> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl HttpClient for MockHttpClient {
        fn execute(
            &self,
            request: &RequestSpec,
        ) -> Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + '_>>
        {
            self.requests.lock().unwrap().push(request.clone());

            let mut responses = self.responses.lock().unwrap();
            let result = if responses.is_empty() {
                Err(HttpClientError::Other("no scripted response".to_string()))
            } else {
                responses.remove(0)
            };

            Box::pin(async move { result })
        }
    }

    /// Clock frozen at 09:30:45 UTC.
    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    /// Reporter that swallows all output.
    struct NullReporter;

    impl Reporter for NullReporter {
        fn banner(&self, _base_url: &str) {}
        fn check_started(&self, _name: &str) {}
        fn check_completed(&self, _outcome: &CheckOutcome) {}
        fn summary(&self, _tally: &RunTally) {}
    }

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 5, 14, 9, 30, 45).unwrap())
    }

    fn response(status: u16, body: &str) -> Result<ResponseSpec, HttpClientError> {
        Ok(ResponseSpec::new(
            status,
            HashMap::new(),
            body.as_bytes().to_vec(),
            Duration::from_millis(5),
        ))
    }

    fn runner_with(
        responses: Vec<Result<ResponseSpec, HttpClientError>>,
    ) -> (
        Arc<MockHttpClient>,
        SmokeRunner<MockHttpClient, FixedClock, NullReporter>,
    ) {
        let client = Arc::new(MockHttpClient::new(responses));
        let runner = SmokeRunner::new(
            "http://service.test",
            Arc::clone(&client),
            fixed_clock(),
            NullReporter,
        )
        .unwrap();
        (client, runner)
    }

    #[test]
    fn test_rejects_bad_base_urls() {
        let client = Arc::new(MockHttpClient::new(Vec::new()));

        let result = SmokeRunner::new("", Arc::clone(&client), fixed_clock(), NullReporter);
        assert_eq!(result.err(), Some(RunnerError::EmptyBaseUrl));

        let result =
            SmokeRunner::new("not a url", Arc::clone(&client), fixed_clock(), NullReporter);
        assert!(matches!(result, Err(RunnerError::InvalidBaseUrl(_))));

        let result = SmokeRunner::new(
            "ftp://service.test",
            Arc::clone(&client),
            fixed_clock(),
            NullReporter,
        );
        assert!(matches!(result, Err(RunnerError::InvalidBaseUrl(_))));
    }

    #[tokio::test]
    async fn test_run_check_success_moves_both_counters() {
        let (_, mut runner) = runner_with(vec![response(200, r#"{"message": "ok"}"#)]);
        let spec = CheckSpec::get("check", "api/", 200);

        let outcome = runner.run_check(&spec).await;

        assert!(outcome.passed);
        assert_eq!(outcome.parsed_json(), Some(&json!({"message": "ok"})));
        assert_eq!(runner.tally().runs(), 1);
        assert_eq!(runner.tally().passed(), 1);
    }

    #[tokio::test]
    async fn test_run_check_mismatch_counts_run_only() {
        let (_, mut runner) = runner_with(vec![response(404, "not found")]);
        let spec = CheckSpec::get("check", "api/", 200);

        let outcome = runner.run_check(&spec).await;

        assert!(!outcome.passed);
        assert_eq!(outcome.actual_status, Some(404));
        assert_eq!(outcome.parsed_json(), None);
        assert_eq!(runner.tally().runs(), 1);
        assert_eq!(runner.tally().passed(), 0);
    }

    #[tokio::test]
    async fn test_run_check_swallows_transport_errors() {
        let (_, mut runner) = runner_with(vec![Err(HttpClientError::ConnectionRefused {
            host: "service.test".to_string(),
            port: 80,
        })]);
        let spec = CheckSpec::get("check", "api/", 200);

        let outcome = runner.run_check(&spec).await;

        assert!(!outcome.passed);
        assert_eq!(outcome.actual_status, None);
        assert_eq!(outcome.parsed_json(), None);
        assert!(outcome.error.is_some());
        assert_eq!(runner.tally().runs(), 1);
    }

    #[tokio::test]
    async fn test_root_endpoint_check() {
        let (client, mut runner) = runner_with(vec![response(200, r#"{"message": "Hello"}"#)]);

        assert!(runner.check_root_endpoint().await);
        assert_eq!(client.requests()[0].url, "http://service.test/api/");
    }

    #[tokio::test]
    async fn test_root_endpoint_check_failure_is_recorded_not_raised() {
        let (_, mut runner) = runner_with(vec![response(404, "")]);

        assert!(!runner.check_root_endpoint().await);
        assert_eq!(runner.tally().runs(), 1);
        assert_eq!(runner.tally().passed(), 0);
    }

    #[tokio::test]
    async fn test_status_endpoints_issue_post_even_when_get_fails() {
        let (client, mut runner) = runner_with(vec![
            response(500, "boom"),
            response(200, r#"{"client_name": "test_client_093045"}"#),
        ]);

        let passed = runner.check_status_endpoints().await;

        assert!(!passed, "AND of a failed GET and a passing POST");
        let requests = client.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].url, "http://service.test/api/status");
    }

    #[tokio::test]
    async fn test_generated_client_name_is_timestamp_derived() {
        let (client, mut runner) = runner_with(vec![response(200, "[]"), response(200, "{}")]);

        runner.check_status_endpoints().await;

        let payload = client.requests()[1].payload.clone().unwrap();
        let name = payload["client_name"].as_str().unwrap();
        assert_eq!(name, "test_client_093045");

        let digits = name.strip_prefix("test_client_").unwrap();
        assert_eq!(digits.len(), 6);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_full_run_all_passing() {
        let (_, mut runner) = runner_with(vec![
            response(200, r#"{"message": "Hello"}"#),
            response(200, "[]"),
            response(200, r#"{"client_name": "test_client_093045"}"#),
        ]);

        assert!(runner.run().await);
        assert_eq!(runner.tally().runs(), 3);
        assert_eq!(runner.tally().passed(), 3);
    }

    #[tokio::test]
    async fn test_full_run_continues_past_failures() {
        let (client, mut runner) = runner_with(vec![
            Err(HttpClientError::Timeout { timeout_ms: 10_000 }),
            response(200, "[]"),
            response(200, "{}"),
        ]);

        assert!(!runner.run().await);
        assert_eq!(client.requests().len(), 3, "all checks issued");
        assert_eq!(runner.tally().runs(), 3);
        assert_eq!(runner.tally().passed(), 2);
    }
}
