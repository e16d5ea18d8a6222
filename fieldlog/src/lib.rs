//! One-shot logger setup and caller-aware structured logging helpers
//!
//! This crate wraps `tracing` with:
//! - A setup guard that applies level and output format exactly once
//! - Leveled helpers that attach call-site `file`/`func`, context, and fields
//! - JSON (production) and coloured text (development) record formats
//!
//! ```no_run
//! use fieldlog::{fields, LogContext};
//!
//! fieldlog::setup("debug", true);
//! fieldlog::info(&LogContext::background(), "worker started", &fields! { "queue" => "mail" });
//! ```

pub mod caller;
pub mod config;
pub mod context;
pub mod event;
pub mod formatter;
pub mod init;
pub mod logger;
pub mod severity;
pub mod sinks;

// Re-export main types for convenience
pub use caller::{Caller, CallerResolver, CALLER_DEPTH};
pub use config::{ConfigError, LoggingConfig};
pub use context::LogContext;
pub use event::LogEntry;
pub use formatter::LogFormat;
pub use init::LoggerSettings;
pub use logger::Logger;
pub use severity::{LogLevel, ParseLevelError};
pub use sinks::{SharedBuffer, Sink};

#[doc(hidden)]
pub use serde_json as __serde_json;

use once_cell::sync::Lazy;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Structured fields attached to a single log call
pub type Fields = HashMap<String, JsonValue>;

static GLOBAL_LOGGER: Lazy<Logger> = Lazy::new(Logger::stdout);

/// Get the process-wide logger (stdout sink)
pub fn logger() -> &'static Logger {
    &GLOBAL_LOGGER
}

/// Configure the process-wide logger. Only the first call has any effect.
pub fn setup(level: &str, is_production: bool) {
    GLOBAL_LOGGER.setup(level, is_production);
}

/// Configure the process-wide logger from loaded configuration
pub fn setup_from_config(config: &LoggingConfig) {
    config.apply(&GLOBAL_LOGGER);
}

// The free functions resolve the caller themselves so that they sit at the
// same depth as the `Logger` methods.

#[inline(never)]
pub fn info(ctx: &LogContext, msg: &str, fields: &Fields) {
    let caller = CallerResolver::new(CALLER_DEPTH).resolve();
    GLOBAL_LOGGER
        .entry(ctx, fields)
        .with_caller(caller)
        .log(LogLevel::Info, msg);
}

#[inline(never)]
pub fn warn(ctx: &LogContext, msg: &str, fields: &Fields) {
    let caller = CallerResolver::new(CALLER_DEPTH).resolve();
    GLOBAL_LOGGER
        .entry(ctx, fields)
        .with_caller(caller)
        .log(LogLevel::Warn, msg);
}

#[inline(never)]
pub fn debug(ctx: &LogContext, msg: &str, fields: &Fields) {
    let caller = CallerResolver::new(CALLER_DEPTH).resolve();
    GLOBAL_LOGGER
        .entry(ctx, fields)
        .with_caller(caller)
        .log(LogLevel::Debug, msg);
}

#[inline(never)]
pub fn error(ctx: &LogContext, msg: &str, fields: &Fields, err: &dyn std::error::Error) {
    let caller = CallerResolver::new(CALLER_DEPTH).resolve();
    GLOBAL_LOGGER
        .entry(ctx, fields)
        .with_caller(caller)
        .with_error(err)
        .log(LogLevel::Error, msg);
}

/// Log at fatal level, then exit the process with status 1
#[inline(never)]
pub fn fatal(ctx: &LogContext, msg: &str, fields: &Fields) -> ! {
    let caller = CallerResolver::new(CALLER_DEPTH).resolve();
    GLOBAL_LOGGER
        .entry(ctx, fields)
        .with_caller(caller)
        .log(LogLevel::Fatal, msg);
    GLOBAL_LOGGER.sink().flush();
    std::process::exit(1)
}

/// Build [`Fields`] from `key => value` pairs of any `Serialize` values
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(
            if let Ok(value) = $crate::__serde_json::to_value($value) {
                fields.insert(::std::string::String::from($key), value);
            }
        )+
        fields
    }};
}
