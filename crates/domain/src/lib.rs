//! Probe Domain - Core smoke-check types
//!
//! This crate defines the domain model for the Probe smoke checker.
//! All types here are pure Rust with no I/O dependencies.

pub mod check;
pub mod error;
pub mod report;
pub mod request;
pub mod response;

pub use check::{CheckSpec, join_url};
pub use error::{DomainError, DomainResult};
pub use report::{BodyPreview, CheckOutcome, PREVIEW_MAX_CHARS, RunTally};
pub use request::{DEFAULT_TIMEOUT, HttpMethod, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
