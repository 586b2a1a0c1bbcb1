//! Log subscriber setup for the command-line tool

use crate::io::error::{GenerationError, Result};
use tracing_subscriber::EnvFilter;

/// Default filter directive for a verbosity setting
///
/// `quiet` wins over any number of `-v` flags.
pub const fn filter_directive(quiet: bool, verbose: u8) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a stderr log subscriber
///
/// `RUST_LOG` takes precedence over the verbosity flags when set.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_logging(quiet: bool, verbose: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(quiet, verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| GenerationError::Logging {
            reason: e.to_string(),
        })
}
