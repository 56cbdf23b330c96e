//! Provides helper functions for initializing log collection.
use anyhow::Result;
use tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter, Registry};

/// Output format of the log layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact, human readable lines.
    #[default]
    Compact,
    /// One JSON object per line.
    Json,
}

/// Initialize tracing.
///
/// Logs are always written to stderr so that stdout can carry rendered output.
pub fn init(format: LogFormat) -> Result<()> {
    // Default to INFO if no env is specified
    let log_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()?;

    let collector = Registry::default();
    match format {
        LogFormat::Compact => {
            let logger = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .compact()
                .with_filter(log_filter);
            tracing::subscriber::set_global_default(collector.with(logger))?;
        }
        LogFormat::Json => {
            let logger = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .json()
                .with_filter(log_filter);
            tracing::subscriber::set_global_default(collector.with(logger))?;
        }
    }

    Ok(())
}
