use super::{event_level, timestamp, Record};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Keys owned by the record itself; caller fields with these names are
/// renamed to `fields.<key>`.
const RESERVED_KEYS: [&str; 3] = ["msg", "level", "time"];

/// Renders each event as a single JSON object line
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl JsonFormat {
    pub(crate) fn render(&self, level: &str, record: Record) -> String {
        let mut object = Map::with_capacity(record.fields.len() + RESERVED_KEYS.len());

        for (key, value) in record.fields {
            if RESERVED_KEYS.contains(&key.as_str()) {
                object.insert(format!("fields.{}", key), value);
            } else {
                object.insert(key, value);
            }
        }

        object.insert("level".to_string(), JsonValue::String(level.to_string()));
        object.insert("msg".to_string(), JsonValue::String(record.message));
        object.insert("time".to_string(), JsonValue::String(timestamp()));

        JsonValue::Object(object).to_string()
    }
}

impl<S, N> FormatEvent<S, N> for JsonFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = event_level(event);
        let record = Record::from_event(event);
        writeln!(writer, "{}", self.render(level.as_str(), record))
    }
}
