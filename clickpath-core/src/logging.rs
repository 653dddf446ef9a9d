use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Compact human-readable lines.
    Pretty,
    /// One JSON object per event, fields flattened.
    Json,
}

/// Pretty when a person is watching stderr, JSON otherwise.
pub fn default_log_format() -> LogFormat {
    if io::stderr().is_terminal() {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    }
}

/// Initialize the global subscriber.
///
/// Logs go to stderr so stdout stays free for report and sample output.
/// Filtering follows `RUST_LOG`, defaulting to `info`.
pub fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(io::stderr);

    match format {
        LogFormat::Pretty => builder.compact().init(),
        LogFormat::Json => builder.json().flatten_event(true).init(),
    }
}
