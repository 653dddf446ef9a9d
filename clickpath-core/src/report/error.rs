use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to create report {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV row: {0}")]
    Write(#[from] csv::Error),

    #[error("failed to encode record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
