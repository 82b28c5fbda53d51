//! Application error types

use thiserror::Error;

/// Errors raised when constructing a smoke runner.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RunnerError {
    /// The base URL is empty.
    #[error("base URL is required")]
    EmptyBaseUrl,

    /// The base URL is not a valid http(s) URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Result type alias for runner construction.
pub type RunnerResult<T> = Result<T, RunnerError>;
