//! Request types
//!
//! The HTTP method a check can issue and the wire-level request
//! specification handed to the HTTP client port.

mod method;
mod spec;

pub use method::HttpMethod;
pub use spec::{DEFAULT_TIMEOUT, RequestSpec};
