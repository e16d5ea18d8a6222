//! Log severity levels and their mapping onto `tracing` metadata

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Target used for fatal events. `tracing` has no level above `ERROR`, so
/// fatal records are emitted at `ERROR` under this target and mapped back.
pub const FATAL_TARGET: &str = "fieldlog::fatal";

/// Log severity levels, least to most severe
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    #[serde(rename = "warning", alias = "warn")]
    Warn,
    Error,
    Fatal,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("not a valid log level: {0:?}")]
pub struct ParseLevelError(pub String);

impl LogLevel {
    /// Name as rendered in records. Warn renders as `"warning"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warning",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }

    /// Parse a level name, falling back to [`LogLevel::Info`] when the name
    /// is not recognised. `panic` is accepted and gates like `fatal`, the
    /// most severe level this crate has.
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|e: ParseLevelError| {
            tracing::trace!(error = %e, "falling back to info level");
            LogLevel::Info
        })
    }

    /// Severity of an event as seen by the engine.
    pub fn from_metadata(metadata: &tracing::Metadata<'_>) -> Self {
        if metadata.target() == FATAL_TARGET {
            return LogLevel::Fatal;
        }

        match *metadata.level() {
            tracing::Level::ERROR => LogLevel::Error,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::DEBUG => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    /// Four-letter uppercase tag used by the text formatter
    pub(crate) fn short_tag(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRAC",
            LogLevel::Debug => "DEBU",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERRO",
            LogLevel::Fatal => "FATA",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" | "panic" => Ok(LogLevel::Fatal),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
