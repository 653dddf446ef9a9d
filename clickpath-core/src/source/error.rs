use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("input path {path} does not exist")]
    NotFound { path: PathBuf },

    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read metadata of {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path} after line {line}: {source}")]
    Read {
        path: PathBuf,
        line: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("{current} starts at {starts}, before {previous} ended at {ended}")]
    OutOfOrder {
        previous: PathBuf,
        current: PathBuf,
        ended: String,
        starts: String,
    },
}

impl SourceError {
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub fn read_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadDir {
            path: path.into(),
            source,
        }
    }
}
