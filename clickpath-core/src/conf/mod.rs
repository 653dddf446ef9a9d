mod error;
mod loader;
pub mod types;
mod validate;

pub use error::{ConfigError, ValidationIssue};
pub use loader::{DEFAULT_CONFIG_FILE, load_config, load_or_default};
pub use types::AnalysisConfig;
