use anyhow::{Context, Result};
use clap::Parser;
use fieldlog::{Fields, LogContext, LoggingConfig};

mod cli;
use cli::{Cli, Commands, RecordArgs};

/// Error handed to `fieldlog::error` for the `error` subcommand
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct CommandError(String);

fn main() -> Result<()> {
    let cli = Cli::parse();
    configure(&cli)?;
    run(cli);
    Ok(())
}

fn configure(cli: &Cli) -> Result<()> {
    match &cli.config {
        Some(path) => {
            let config = LoggingConfig::from_file(path)
                .with_context(|| format!("Failed to load logging config from {}", path.display()))?;
            fieldlog::setup_from_config(&config);
        }
        None => fieldlog::setup(&cli.level, cli.production),
    }
    Ok(())
}

fn context(trace_id: Option<String>) -> LogContext {
    match trace_id {
        Some(id) => LogContext::new().with_trace_id(id),
        None => LogContext::background(),
    }
}

fn into_fields(record: &RecordArgs) -> Fields {
    record.fields.iter().cloned().collect()
}

fn run(cli: Cli) {
    let ctx = context(cli.trace_id);

    match cli.command {
        Commands::Info(record) => fieldlog::info(&ctx, &record.message, &into_fields(&record)),
        Commands::Warn(record) => fieldlog::warn(&ctx, &record.message, &into_fields(&record)),
        Commands::Debug(record) => fieldlog::debug(&ctx, &record.message, &into_fields(&record)),
        Commands::Error { record, error } => fieldlog::error(
            &ctx,
            &record.message,
            &into_fields(&record),
            &CommandError(error),
        ),
        Commands::Fatal(record) => fieldlog::fatal(&ctx, &record.message, &into_fields(&record)),
    }
}
