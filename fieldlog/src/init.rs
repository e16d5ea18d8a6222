use crate::formatter::{JsonFormat, LogFormat, TextFormat};
use crate::severity::LogLevel;
use crate::sinks::Sink;
use serde::{Deserialize, Serialize};
use tracing::Dispatch;
use tracing_subscriber::filter;
use tracing_subscriber::layer::{Layer, SubscriberExt};

/// Level and output shape applied to a logger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoggerSettings {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl LoggerSettings {
    /// Settings for `setup(level, is_production)`: unknown levels become
    /// info, production selects JSON and anything else the text format.
    pub fn from_setup(level: &str, is_production: bool) -> Self {
        Self {
            level: LogLevel::parse_or_default(level),
            format: if is_production {
                LogFormat::Json
            } else {
                LogFormat::Text
            },
        }
    }
}

/// Engine instance built for one set of settings
pub(crate) struct Backend {
    pub settings: LoggerSettings,
    pub dispatch: Dispatch,
}

impl Backend {
    pub fn new(settings: LoggerSettings, sink: Sink) -> Self {
        let min_level = settings.level;
        let gate =
            filter::filter_fn(move |metadata| LogLevel::from_metadata(metadata) >= min_level);

        let layer = tracing_subscriber::fmt::layer().with_writer(sink);

        let dispatch = match settings.format {
            LogFormat::Json => Dispatch::new(
                tracing_subscriber::registry()
                    .with(layer.event_format(JsonFormat).with_filter(gate)),
            ),
            LogFormat::Text => Dispatch::new(
                tracing_subscriber::registry()
                    .with(layer.event_format(TextFormat).with_filter(gate)),
            ),
        };

        Self { settings, dispatch }
    }
}
