mod cli;
mod cli_modes;
mod common;
mod render;

use anyhow::Result;
use cli::Cli;
use cli_modes::KerjaCli;
use kerja_core::Kerja;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("kerja: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::new();
    let kerja = Kerja::new()?;
    KerjaCli::new(cli, kerja).run()
}

/// Diagnostics go to stderr, filtered by `KERJA_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("KERJA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
