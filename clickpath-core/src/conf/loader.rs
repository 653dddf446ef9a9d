use crate::conf::{AnalysisConfig, ConfigError};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "clickpath.hcl";

/// Reads and parses an HCL config file. Missing blocks and fields take their defaults.
pub fn load_config(path: &Path) -> Result<AnalysisConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    hcl::from_str(&s).map_err(|e| ConfigError::parse(path, e))
}

/// Loads `path` when given. Otherwise loads [`DEFAULT_CONFIG_FILE`] from the
/// working directory if present, falling back to built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<AnalysisConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.is_file() {
                load_config(default)
            } else {
                Ok(AnalysisConfig::default())
            }
        }
    }
}
