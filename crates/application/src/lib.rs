//! Probe Application - Use cases and ports
//!
//! The smoke-run use case lives here together with the ports it depends
//! on. Adapters in the infrastructure crate implement the ports.

pub mod error;
pub mod ports;
pub mod runner;

pub use error::{RunnerError, RunnerResult};
pub use runner::SmokeRunner;
