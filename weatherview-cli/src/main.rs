//! Binary crate for the `weatherview` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - The interactive lookup widget and its text rendering

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
#[cfg(test)]
mod testing;
mod view;

/// Filter used when `RUST_LOG` is unset. Query failures are logged at warn
/// with their kind, so they show up by default.
fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cmd = cli::Cli::parse();
    init_tracing(cmd.verbose);
    cmd.run().await
}
