//! CLI argument parsing definitions

use clap::{Args, Parser, Subcommand};
use serde_json::Value as JsonValue;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a YAML logging configuration (takes precedence over --level/--production)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Minimum level (trace, debug, info, warn, error, fatal); unknown names mean info
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    pub level: String,

    /// Emit JSON records instead of coloured text
    #[arg(long, global = true)]
    pub production: bool,

    /// Trace identifier attached to the record
    #[arg(long, value_name = "ID", global = true)]
    pub trace_id: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Emit an info record
    Info(RecordArgs),

    /// Emit a warning record
    Warn(RecordArgs),

    /// Emit a debug record
    Debug(RecordArgs),

    /// Emit an error record
    Error {
        #[command(flatten)]
        record: RecordArgs,

        /// Error text rendered under the `error` key
        #[arg(long, value_name = "TEXT", default_value = "unspecified error")]
        error: String,
    },

    /// Emit a fatal record and exit with status 1
    Fatal(RecordArgs),
}

#[derive(Args)]
pub struct RecordArgs {
    /// Human-readable message
    pub message: String,

    /// Structured field; the value is parsed as JSON when possible (example: -f attempts=3)
    #[arg(short = 'f', long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, JsonValue)>,
}

/// Parse `key=value`, keeping the value as a string unless it is valid JSON
pub fn parse_field(raw: &str) -> Result<(String, JsonValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {:?}", raw))?;
    if key.is_empty() {
        return Err(format!("empty field name in {:?}", raw));
    }

    let value =
        serde_json::from_str(value).unwrap_or_else(|_| JsonValue::String(value.to_string()));
    Ok((key.to_string(), value))
}
