//! Mapprobe CLI: geodesy checks for Leaflet map testing
//!
//! ## Usage
//!
//! ```bash
//! mapprobe distance 37.7749,-122.4194 40.7128,-74.0060
//! mapprobe destination 51.5,-0.12 --bearing 90 --distance 10
//! mapprobe area --points "0,0;0,1;1,1;1,0"
//! mapprobe --format json validate 95,20   # exit code 2
//! ```

use clap::Parser;
use mapprobe_cli::{handlers, Cli, CliConfig, CliResult, Verbosity};
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Exit code when `validate` or `bounds` rejects its input
const EXIT_INVALID: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_INVALID),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the command's verdict was positive
fn run() -> CliResult<bool> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    init_logging(config.verbosity);

    tracing::debug!(command = ?cli.command, "running");
    let report = handlers::execute(&cli.command, &config)?;
    report.print(config.format)?;
    Ok(report.is_valid())
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let config = CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_format(cli.format);

    match &cli.config {
        Some(path) => config.load_probe(path),
        None => Ok(config),
    }
}

/// Install the global subscriber; `RUST_LOG` overrides the flag-derived level
fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init();
}
