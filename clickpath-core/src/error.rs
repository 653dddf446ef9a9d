use crate::conf::ConfigError;
use crate::report::ReportError;
use crate::source::SourceError;
use thiserror::Error;

/// Anything that stops a run. Unparseable lines are never among these.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Report(#[from] ReportError),
}
