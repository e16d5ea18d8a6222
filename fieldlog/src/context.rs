use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use uuid::Uuid;

tokio::task_local! {
    static CURRENT_CONTEXT: LogContext;
}

/// Per-call context handed to every leveled function.
///
/// Values placed here travel with the log entry; the trace and span
/// identifiers, when present, are forwarded to the engine as record fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogContext {
    trace_id: Option<String>,
    span_id: Option<String>,
    values: HashMap<String, JsonValue>,
}

impl LogContext {
    /// Empty context with no identifiers and no values
    pub fn background() -> Self {
        Self::default()
    }

    /// Create a new log context with generated IDs
    pub fn new() -> Self {
        Self {
            trace_id: Some(Uuid::new_v4().to_string()),
            span_id: Some(Self::generate_span_id()),
            values: HashMap::new(),
        }
    }

    /// Create a child context with the same trace ID but new span ID
    pub fn child(&self) -> Self {
        Self {
            trace_id: self.trace_id.clone(),
            span_id: Some(Self::generate_span_id()),
            values: self.values.clone(),
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    pub fn with_span_id(mut self, span_id: impl Into<String>) -> Self {
        self.span_id = Some(span_id.into());
        self
    }

    /// Add a value to the context
    pub fn with_value(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.values.insert(key.into(), json_value);
        }
        self
    }

    /// Add multiple values to the context
    pub fn with_values(mut self, values: HashMap<String, JsonValue>) -> Self {
        self.values.extend(values);
        self
    }

    pub fn value(&self, key: &str) -> Option<&JsonValue> {
        self.values.get(key)
    }

    pub fn values(&self) -> &HashMap<String, JsonValue> {
        &self.values
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn span_id(&self) -> Option<&str> {
        self.span_id.as_deref()
    }

    /// Get the current context from task-local storage, or an empty one
    /// outside [`LogContext::scope`]
    pub fn current() -> Self {
        CURRENT_CONTEXT
            .try_with(|ctx| ctx.clone())
            .unwrap_or_else(|_| Self::background())
    }

    /// Run a future with this context as current
    pub async fn scope<F, T>(self, f: F) -> T
    where
        F: std::future::Future<Output = T>,
    {
        CURRENT_CONTEXT.scope(self, f).await
    }

    /// Generate a short span ID
    fn generate_span_id() -> String {
        // Use the low 8 bytes of a UUID for shorter span IDs
        let uuid = Uuid::new_v4();
        format!("{:016x}", uuid.as_u128() & 0xFFFF_FFFF_FFFF_FFFF)
    }
}
