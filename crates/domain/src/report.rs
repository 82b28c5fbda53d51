//! Check outcomes and the run tally.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::response::{ResponseSpec, format_duration};

/// Maximum characters of body text kept for display when a response body
/// is not valid JSON.
pub const PREVIEW_MAX_CHARS: usize = 200;

/// Preview of a response body attached to a check outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPreview {
    /// Body parsed as JSON.
    Json(Value),
    /// Body kept as a truncated text preview.
    Text(String),
    /// The body was empty.
    Empty,
}

impl BodyPreview {
    /// Builds a preview from a raw body: JSON when it parses, otherwise a
    /// truncated text preview; empty bodies yield [`BodyPreview::Empty`].
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        if body.is_empty() {
            return Self::Empty;
        }
        match serde_json::from_str(body) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(truncate(body, PREVIEW_MAX_CHARS)),
        }
    }

    /// Builds a text-only preview.
    ///
    /// Used for failed checks, where the body is shown for diagnosis but
    /// never treated as parsed output.
    #[must_use]
    pub fn text_only(body: &str) -> Self {
        if body.is_empty() {
            Self::Empty
        } else {
            Self::Text(truncate(body, PREVIEW_MAX_CHARS))
        }
    }

    /// Returns the parsed JSON value, if any.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) | Self::Empty => None,
        }
    }

    /// Returns true when there is nothing to display.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Result of running a single check (one request/response validation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Human-readable check name.
    pub name: String,
    /// Whether the actual status matched the expected one.
    pub passed: bool,
    /// The status code the check expected.
    pub expected_status: u16,
    /// The status code actually received, absent on transport failure.
    pub actual_status: Option<u16>,
    /// Preview of the response body.
    pub body: BodyPreview,
    /// Transport error message, when the request never produced a response.
    pub error: Option<String>,
    /// Time spent on the request.
    pub duration: Duration,
}

impl CheckOutcome {
    /// Builds the outcome for a completed request/response exchange.
    #[must_use]
    pub fn from_response(
        name: impl Into<String>,
        expected_status: u16,
        response: &ResponseSpec,
    ) -> Self {
        let passed = response.status == expected_status;
        let body = if passed {
            BodyPreview::from_body(&response.body)
        } else {
            BodyPreview::text_only(&response.body)
        };

        Self {
            name: name.into(),
            passed,
            expected_status,
            actual_status: Some(response.status),
            body,
            error: None,
            duration: response.duration,
        }
    }

    /// Builds the outcome for a check whose request never completed.
    #[must_use]
    pub fn from_transport_error(
        name: impl Into<String>,
        expected_status: u16,
        error: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            passed: false,
            expected_status,
            actual_status: None,
            body: BodyPreview::Empty,
            error: Some(error.into()),
            duration,
        }
    }

    /// Returns the parsed response body.
    ///
    /// `Some` only when the check passed and the body parsed as JSON;
    /// failed checks and non-JSON bodies yield `None`.
    #[must_use]
    pub fn parsed_json(&self) -> Option<&Value> {
        if self.passed { self.body.as_json() } else { None }
    }

    /// Returns a human-readable duration string.
    #[must_use]
    pub fn duration_display(&self) -> String {
        format_duration(self.duration)
    }
}

/// Pass/fail counters for a smoke run.
///
/// Counters only move through [`RunTally::record`], which keeps
/// `passed <= runs` at every point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTally {
    runs: u32,
    passed: u32,
}

impl RunTally {
    /// Creates an empty tally.
    #[must_use]
    pub const fn new() -> Self {
        Self { runs: 0, passed: 0 }
    }

    /// Records one finished check.
    pub const fn record(&mut self, passed: bool) {
        self.runs += 1;
        if passed {
            self.passed += 1;
        }
    }

    /// Number of checks run so far.
    #[must_use]
    pub const fn runs(&self) -> u32 {
        self.runs
    }

    /// Number of checks that passed so far.
    #[must_use]
    pub const fn passed(&self) -> u32 {
        self.passed
    }

    /// Number of checks that failed so far.
    #[must_use]
    pub const fn failed(&self) -> u32 {
        self.runs - self.passed
    }

    /// True when every recorded check passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.passed == self.runs
    }
}

impl fmt::Display for RunTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.passed, self.runs)
    }
}
