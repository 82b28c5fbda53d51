//! Progress reporting adapters.

mod console;

pub use console::ConsoleReporter;
