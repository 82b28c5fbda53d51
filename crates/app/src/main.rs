//! Probe - API smoke checker entry point.
//!
//! Wires the adapters into the runner, executes the fixed check
//! sequence, and maps the aggregate outcome onto the process exit code.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use probe_application::SmokeRunner;
use probe_infrastructure::{ConsoleReporter, ReqwestHttpClient, SystemClock};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "probe")]
#[command(about = "Smoke-checks a service's API endpoints", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the service under test
    #[arg(long, env = "PROBE_BASE_URL", default_value = "http://localhost:8000")]
    base_url: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing; diagnostics go to stderr so they never mix
    // with the check report on stdout.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("probe: {error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Builds the runner from the real adapters and executes the sequence.
async fn run(cli: Cli) -> Result<bool> {
    let client = Arc::new(ReqwestHttpClient::new()?);
    let mut runner = SmokeRunner::new(
        cli.base_url,
        client,
        SystemClock::new(),
        ConsoleReporter::new(),
    )?;

    Ok(runner.run().await)
}
