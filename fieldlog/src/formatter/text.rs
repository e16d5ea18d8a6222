use super::{event_level, timestamp, Record};
use crate::severity::LogLevel;
use colored::Color;
use serde_json::Value as JsonValue;
use std::fmt;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Messages are padded to this width so fields line up
const MESSAGE_WIDTH: usize = 44;

/// Human-readable formatter for development terminals.
///
/// Colours are always emitted, whether or not the sink is a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormat;

impl TextFormat {
    pub(crate) fn render(&self, level: LogLevel, record: Record) -> String {
        let color = level_color(level);
        let mut line = format!(
            "{}[{}] {:<width$}",
            paint(level.short_tag(), color),
            timestamp(),
            record.message.trim_end_matches('\n'),
            width = MESSAGE_WIDTH
        );

        let mut keys: Vec<&String> = record.fields.keys().collect();
        keys.sort();
        for key in keys {
            line.push(' ');
            line.push_str(&paint(key, color));
            line.push('=');
            line.push_str(&render_value(&record.fields[key]));
        }

        line
    }
}

impl<S, N> FormatEvent<S, N> for TextFormat
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
        writeln!(writer, "{}", self.render(level, record))
    }
}

fn level_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Trace | LogLevel::Debug => Color::White,
        LogLevel::Info => Color::Cyan,
        LogLevel::Warn => Color::Yellow,
        LogLevel::Error | LogLevel::Fatal => Color::Red,
    }
}

// Written by hand rather than through `Colorize` so the codes survive a
// non-terminal sink.
fn paint(text: &str, color: Color) -> String {
    format!("\x1b[{}m{}\x1b[0m", color.to_fg_str(), text)
}

fn render_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) if needs_quoting(s) => format!("{:?}", s),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn needs_quoting(text: &str) -> bool {
    text.is_empty()
        || !text.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '/' | '@' | '^' | '+')
        })
}
