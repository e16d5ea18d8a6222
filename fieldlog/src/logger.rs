use crate::caller::{CallerResolver, CALLER_DEPTH};
use crate::context::LogContext;
use crate::event::LogEntry;
use crate::formatter::LogFormat;
use crate::init::{Backend, LoggerSettings};
use crate::severity::LogLevel;
use crate::sinks::Sink;
use crate::Fields;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;
use tracing::Dispatch;

/// Shared logger handle.
///
/// Starts at info level with the JSON formatter. The first call to
/// [`Logger::setup`] replaces both for the rest of the handle's lifetime;
/// every later call is ignored. Clones share the same state.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

struct LoggerInner {
    sink: Sink,
    default: Backend,
    configured: OnceCell<Backend>,
}

impl Logger {
    pub fn new(sink: impl Into<Sink>) -> Self {
        let sink = sink.into();
        Self {
            inner: Arc::new(LoggerInner {
                default: Backend::new(LoggerSettings::default(), sink.clone()),
                sink,
                configured: OnceCell::new(),
            }),
        }
    }

    /// Logger writing to standard output
    pub fn stdout() -> Self {
        Self::new(Sink::Stdout)
    }

    /// Apply level and format once.
    ///
    /// An unknown `level` falls back to info. `is_production` selects JSON
    /// with RFC 3339 timestamps, otherwise coloured text. Concurrent first
    /// callers block until the winning call has applied its settings.
    pub fn setup(&self, level: &str, is_production: bool) {
        let mut applied = false;
        self.inner.configured.get_or_init(|| {
            applied = true;
            Backend::new(
                LoggerSettings::from_setup(level, is_production),
                self.inner.sink.clone(),
            )
        });

        if !applied {
            tracing::trace!(
                level = level,
                is_production = is_production,
                "logger already configured, ignoring setup"
            );
        }
    }

    /// Whether [`Logger::setup`] has taken effect
    pub fn is_configured(&self) -> bool {
        self.inner.configured.get().is_some()
    }

    pub fn settings(&self) -> LoggerSettings {
        self.backend().settings
    }

    pub fn level(&self) -> LogLevel {
        self.settings().level
    }

    pub fn format(&self) -> LogFormat {
        self.settings().format
    }

    pub fn is_level_enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    pub fn sink(&self) -> &Sink {
        &self.inner.sink
    }

    /// Start an entry carrying `ctx` and a copy of `fields`
    pub fn entry(&self, ctx: &LogContext, fields: &Fields) -> LogEntry<'_> {
        LogEntry::new(self, ctx, fields)
    }

    pub(crate) fn dispatch(&self) -> &Dispatch {
        &self.backend().dispatch
    }

    fn backend(&self) -> &Backend {
        self.inner.configured.get().unwrap_or(&self.inner.default)
    }

    // Each leveled method must call the resolver itself: see `CALLER_DEPTH`.

    #[inline(never)]
    pub fn info(&self, ctx: &LogContext, msg: &str, fields: &Fields) {
        let caller = CallerResolver::new(CALLER_DEPTH).resolve();
        self.entry(ctx, fields).with_caller(caller).log(LogLevel::Info, msg);
    }

    #[inline(never)]
    pub fn warn(&self, ctx: &LogContext, msg: &str, fields: &Fields) {
        let caller = CallerResolver::new(CALLER_DEPTH).resolve();
        self.entry(ctx, fields).with_caller(caller).log(LogLevel::Warn, msg);
    }

    #[inline(never)]
    pub fn debug(&self, ctx: &LogContext, msg: &str, fields: &Fields) {
        let caller = CallerResolver::new(CALLER_DEPTH).resolve();
        self.entry(ctx, fields).with_caller(caller).log(LogLevel::Debug, msg);
    }

    #[inline(never)]
    pub fn error(&self, ctx: &LogContext, msg: &str, fields: &Fields, err: &dyn std::error::Error) {
        let caller = CallerResolver::new(CALLER_DEPTH).resolve();
        self.entry(ctx, fields)
            .with_caller(caller)
            .with_error(err)
            .log(LogLevel::Error, msg);
    }

    /// Emit at fatal level, flush the sink and exit the process with status 1
    #[inline(never)]
    pub fn fatal(&self, ctx: &LogContext, msg: &str, fields: &Fields) -> ! {
        let caller = CallerResolver::new(CALLER_DEPTH).resolve();
        self.entry(ctx, fields).with_caller(caller).log(LogLevel::Fatal, msg);
        self.inner.sink.flush();
        std::process::exit(1)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("sink", &self.inner.sink)
            .field("settings", &self.settings())
            .field("configured", &self.is_configured())
            .finish()
    }
}
