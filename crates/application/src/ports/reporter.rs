//! Reporter port for progress output

use probe_domain::{CheckOutcome, RunTally};

/// Port for emitting human-readable progress during a run.
///
/// The console adapter prints one line per check; tests substitute a
/// silent or recording implementation.
pub trait Reporter: Send + Sync {
    /// Called once before any check runs.
    fn banner(&self, base_url: &str);

    /// Called when a check is about to be issued.
    fn check_started(&self, name: &str);

    /// Called with the outcome of a finished check.
    fn check_completed(&self, outcome: &CheckOutcome);

    /// Called once after all checks, with the aggregate tally.
    fn summary(&self, tally: &RunTally);
}
