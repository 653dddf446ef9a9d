use crate::conf::{AnalysisConfig, ConfigError, ValidationIssue};

impl AnalysisConfig {
    /// Checks every section, reporting all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut issues = Vec::new();
        let mut issue = |field: &'static str, message: String| {
            issues.push(ValidationIssue { field, message });
        };

        //--------------------------------------------------------------------------
        // Input
        //--------------------------------------------------------------------------
        if self.input.path.as_os_str().is_empty() {
            issue("input.path", "input path must not be empty".to_string());
        }
        if self.input.suffix.is_empty() {
            issue("input.suffix", "compressed file suffix must not be empty".to_string());
        }

        //--------------------------------------------------------------------------
        // Filter
        //--------------------------------------------------------------------------
        if let Some(status) = self.filter.statuses.iter().find(|s| !(100..=599).contains(*s)) {
            issue("filter.statuses", format!("{status} is not an HTTP status code"));
        }
        if self.filter.methods.iter().any(|m| m.trim().is_empty()) {
            issue("filter.methods", "methods must not contain empty entries".to_string());
        }
        if self.filter.bot_tokens.iter().any(|t| t.is_empty()) {
            issue(
                "filter.bot_tokens",
                "an empty bot token would match every user agent".to_string(),
            );
        }
        if self.filter.url_exclusions.iter().any(|f| f.is_empty()) {
            issue(
                "filter.url_exclusions",
                "an empty exclusion would match every request".to_string(),
            );
        }

        //--------------------------------------------------------------------------
        // Reports
        //--------------------------------------------------------------------------
        if self.folders.tier == 0 {
            issue("folders.tier", "folder tier must be at least 1".to_string());
        }
        if !self.search.path_prefix.starts_with('/') {
            issue(
                "search.path_prefix",
                format!("'{}' must start with '/'", self.search.path_prefix),
            );
        }
        if self.search.param.is_empty() {
            issue("search.param", "search parameter name must not be empty".to_string());
        }
        if !self.next_url.anchor_path.starts_with('/') {
            issue(
                "next_url.anchor_path",
                format!("'{}' must start with '/'", self.next_url.anchor_path),
            );
        }
        if let Some(anchor) = self
            .export
            .anchor_path
            .as_deref()
            .filter(|a| !a.starts_with('/'))
        {
            issue("export.anchor_path", format!("'{anchor}' must start with '/'"));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation { issues })
        }
    }
}
