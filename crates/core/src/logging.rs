//! Logging bootstrap for embedders.
//!
//! Diagnostics use the tracing ecosystem throughout: rejected provider
//! registrations log a warning, per-actor extraction faults log an error
//! with the actor's name and id. This module wires a stderr subscriber for
//! hosts that don't install their own.
//!
//! # Environment Variables
//!
//! - `PARTYVIEW_LOG`: Filter directive (like `RUST_LOG`), e.g.
//!   `partyview=debug`
//! - `PARTYVIEW_LOG_FORMAT`: Output format: `pretty`, `json`, `compact`

use std::env;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "PARTYVIEW_LOG";

/// Environment variable controlling the stderr output format.
pub const LOG_FORMAT_ENV: &str = "PARTYVIEW_LOG_FORMAT";

/// Log output format for stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable output (default)
    #[default]
    Pretty,
    /// Newline-delimited JSON
    Json,
    /// Single-line, abbreviated output
    Compact,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            other => Err(Error::Other(format!("unknown log format: {other}"))),
        }
    }
}

/// Initialize a stderr tracing subscriber.
///
/// `default_directive` applies when `PARTYVIEW_LOG` is unset, e.g.
/// `"partyview=warn"`. Fails if a global subscriber is already installed.
pub fn init_logging(default_directive: &str) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let format = env::var(LOG_FORMAT_ENV)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    result.map_err(|e| Error::Other(format!("failed to initialize logging: {e}")))?;

    tracing::debug!(format = ?format, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("verbose".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_format_default() {
        assert_eq!(LogFormat::default(), LogFormat::Pretty);
    }
}
