//! Logging setup using `tracing` + `tracing-subscriber`
//!
//! Priority for determining the log level:
//! 1. `--verbose` (debug)
//! 2. `TASKLANES_LOG` environment variable (e.g. "info", "trace")
//! 3. default to `warn`
//!
//! Logs go to stderr so JSON on stdout stays parseable.

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::fmt;

/// Environment variable consulted for the log level
pub const LOG_ENV: &str = "TASKLANES_LOG";

/// Installs the global logging subscriber
pub fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        std::env::var(LOG_ENV)
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(Level::WARN)
    };

    fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise logging: {}", e))
}

fn parse_level_str(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
