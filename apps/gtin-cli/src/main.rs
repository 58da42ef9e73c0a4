//! # gtin
//!
//! Command-line front end for the gtin-core EAN-13 codec.
//!
//! ## Usage
//! ```text
//! gtin check-digit 400638133393          # 1
//! gtin validate 4006381333931 590123412345x
//! gtin inspect --json 2000000000428
//! gtin generate --prefix 200 --product-id 42 -n 10
//! gtin generate --seed 7                 # reproducible random digits
//! ```
//!
//! ## Environment
//! - `GTIN_DEFAULT_PREFIX`, `GTIN_OVERFLOW_POLICY`, `GTIN_MAX_COUNT` (see [`config`])
//! - `RUST_LOG` overrides the log filter

mod commands;
mod config;

use std::io;
use std::process::ExitCode;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::commands::{CommandLine, Outcome};
use crate::config::CliConfig;

fn main() -> anyhow::Result<ExitCode> {
    let cli = CommandLine::parse_args();

    init_logging(cli.verbose);

    let config = CliConfig::load()?;
    debug!(?config, "Configuration loaded");

    let stdout = io::stdout();
    let outcome = commands::run(cli.command, &config, &mut stdout.lock())?;

    Ok(match outcome {
        Outcome::Success => ExitCode::SUCCESS,
        Outcome::Invalid => ExitCode::FAILURE,
    })
}

/// Logs go to stderr so stdout stays clean for piping codes.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "gtin=debug,gtin_core=debug"
    } else {
        "gtin=info,gtin_core=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}
