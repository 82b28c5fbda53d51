//! Console progress reporter.
//!
//! Prints one styled line per check plus the final summary: banner,
//! progress lines, tally.

use console::style;

use probe_application::ports::Reporter;
use probe_domain::{BodyPreview, CheckOutcome, RunTally, StatusCode};

/// Reporter that writes styled, human-readable lines to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Creates a new console reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn print_body(outcome: &CheckOutcome) {
        match &outcome.body {
            BodyPreview::Json(value) => println!("    {}", style(value).dim()),
            BodyPreview::Text(preview) => println!("    {}", style(preview).dim()),
            BodyPreview::Empty => {}
        }
    }
}

impl Reporter for ConsoleReporter {
    fn banner(&self, base_url: &str) {
        println!("{}", style("Probe - API smoke checks").bold());
        println!("Target: {}", style(base_url).cyan());
    }

    fn check_started(&self, name: &str) {
        println!();
        println!("{} {}...", style(">>").cyan(), name);
    }

    fn check_completed(&self, outcome: &CheckOutcome) {
        if outcome.passed {
            let status = outcome
                .actual_status
                .map_or_else(String::new, |s| StatusCode::new(s).to_string());
            println!(
                "  {} {} ({})",
                style("✓").green(),
                status,
                outcome.duration_display(),
            );
            Self::print_body(outcome);
        } else if let Some(actual) = outcome.actual_status {
            println!(
                "  {} expected {}, got {}",
                style("×").red(),
                outcome.expected_status,
                style(StatusCode::new(actual)).red(),
            );
            Self::print_body(outcome);
        } else {
            let error = outcome.error.as_deref().unwrap_or("request failed");
            println!("  {} {}", style("×").red(), style(error).red());
        }
    }

    fn summary(&self, tally: &RunTally) {
        println!();
        let counts = tally.to_string();
        if tally.all_passed() {
            println!(
                "{} {}",
                style("Checks passed:").bold(),
                style(counts).green()
            );
        } else {
            println!("{} {}", style("Checks passed:").bold(), style(counts).red());
        }
    }
}
