//! Record formatters plugged into the `tracing-subscriber` fmt layer

pub mod json;
pub mod text;

pub use json::JsonFormat;
pub use text::TextFormat;

use crate::severity::LogLevel;
use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::Event;

/// Event field carrying the caller's structured fields as a JSON object
pub(crate) const FIELDS_KEY: &str = "fields";

/// Output shape selected at setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line with an RFC 3339 `time` key
    #[default]
    Json,
    /// Human-readable line with full timestamps and forced colours
    Text,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => f.write_str("json"),
            LogFormat::Text => f.write_str("text"),
        }
    }
}

/// Everything a formatter needs from one event
#[derive(Debug, Default)]
pub(crate) struct Record {
    pub message: String,
    pub fields: Map<String, JsonValue>,
}

impl Record {
    pub fn from_event(event: &Event<'_>) -> Self {
        let mut record = Record::default();
        event.record(&mut record);
        record
    }
}

impl Visit for Record {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            FIELDS_KEY => match serde_json::from_str::<Map<String, JsonValue>>(value) {
                Ok(fields) => self.fields.extend(fields),
                Err(_) => {
                    self.fields
                        .insert(FIELDS_KEY.to_string(), JsonValue::String(value.to_string()));
                }
            },
            name => {
                self.fields
                    .insert(name.to_string(), JsonValue::String(value.to_string()));
            }
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.insert(field.name().to_string(), value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), value.into());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.fields
            .insert(field.name().to_string(), JsonValue::String(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{:?}", value);
        if field.name() == "message" {
            self.message = rendered;
        } else {
            self.fields
                .insert(field.name().to_string(), JsonValue::String(rendered));
        }
    }
}

/// RFC 3339 timestamp in the local offset
pub(crate) fn timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Level of an event as rendered in records
pub(crate) fn event_level(event: &Event<'_>) -> LogLevel {
    LogLevel::from_metadata(event.metadata())
}
