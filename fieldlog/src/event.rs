use crate::caller::Caller;
use crate::context::LogContext;
use crate::logger::Logger;
use crate::severity::{LogLevel, FATAL_TARGET};
use crate::Fields;
use serde::Serialize;
use serde_json::json;

/// A pending record: context plus merged fields, emitted with [`LogEntry::log`]
#[derive(Debug)]
pub struct LogEntry<'a> {
    logger: &'a Logger,
    context: LogContext,
    fields: Fields,
}

impl<'a> LogEntry<'a> {
    pub(crate) fn new(logger: &'a Logger, context: &LogContext, fields: &Fields) -> Self {
        Self {
            logger,
            context: context.clone(),
            fields: fields.clone(),
        }
    }

    /// Context attached to this entry
    pub fn context(&self) -> &LogContext {
        &self.context
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.fields.insert(key.into(), json_value);
        }
        self
    }

    pub fn with_fields(mut self, fields: &Fields) -> Self {
        self.fields
            .extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Attach `file` and `func`; a missing caller leaves the entry untouched
    pub fn with_caller(mut self, caller: Option<Caller>) -> Self {
        if let Some(caller) = caller {
            caller.merge_into(&mut self.fields);
        }
        self
    }

    /// Render the error through `Display` under the `error` key
    pub fn with_error(mut self, err: &dyn std::error::Error) -> Self {
        self.fields.insert("error".to_string(), json!(err.to_string()));
        self
    }

    /// Emit one record at `level`. Filtering is left to the logger's engine.
    pub fn log(self, level: LogLevel, msg: &str) {
        let payload = serde_json::to_string(&self.fields).unwrap_or_else(|_| "{}".to_string());
        let trace_id = self.context.trace_id();
        let span_id = self.context.span_id();

        tracing::dispatcher::with_default(self.logger.dispatch(), || {
            emit(level, msg, trace_id, span_id, &payload)
        });
    }
}

fn emit(
    level: LogLevel,
    message: &str,
    trace_id: Option<&str>,
    span_id: Option<&str>,
    fields: &str,
) {
    macro_rules! emit_at {
        (target: $target:expr, $lvl:expr) => {
            tracing::event!(
                target: $target,
                $lvl,
                trace_id = trace_id,
                span_id = span_id,
                fields = fields,
                "{}",
                message
            )
        };
        ($lvl:expr) => {
            tracing::event!(
                $lvl,
                trace_id = trace_id,
                span_id = span_id,
                fields = fields,
                "{}",
                message
            )
        };
    }

    match level {
        LogLevel::Trace => emit_at!(tracing::Level::TRACE),
        LogLevel::Debug => emit_at!(tracing::Level::DEBUG),
        LogLevel::Info => emit_at!(tracing::Level::INFO),
        LogLevel::Warn => emit_at!(tracing::Level::WARN),
        LogLevel::Error => emit_at!(tracing::Level::ERROR),
        LogLevel::Fatal => emit_at!(target: FATAL_TARGET, tracing::Level::ERROR),
    }
}
