//! Structured logging setup
//!
//! Everything in the crate logs through `tracing`; this module owns the
//! subscriber bootstrap and the small level vocabulary shared with the
//! error pipeline. Correlation IDs live in [`correlation`].

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use tracing::Level;
use tracing_subscriber::{EnvFilter, prelude::*};

pub mod correlation;

/// Log levels for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    /// Reserved for failures whose mode is unknown; maps onto `ERROR` for
    /// the subscriber, which has no level above it.
    Fatal,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error | LogLevel::Fatal => Level::ERROR,
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        };
        write!(f, "{name}")
    }
}

/// Initialize the global subscriber: env-filtered, fmt layer with file and
/// line numbers. Safe to call more than once; only the first call wins.
pub fn init() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_line_number(true)
                .with_file(true),
        )
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_convert_to_tracing() {
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
        assert_eq!(Level::from(LogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(LogLevel::Fatal), Level::ERROR);
    }

    #[test]
    fn level_display_matches_tag_vocabulary() {
        assert_eq!(LogLevel::Warn.to_string(), "warn");
        assert_eq!(LogLevel::Fatal.to_string(), "fatal");
    }
}
