use crate::correlate::{AnchorPolicy, AnchorRule};
use crate::path::Reduction;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Bot identities excluded from human traffic unless configured otherwise.
pub const DEFAULT_BOT_TOKENS: &[&str] = &[
    "bot",
    "googlebot",
    "bingbot",
    "yandex",
    "baiduspider",
    "ahrefsbot",
    "semrushbot",
    "dataforseo",
    "gptbot",
    "pinterestbot",
    "cloudflare-healthchecks",
    "makemerrybot",
    "applebot",
    "statuscake",
    "pingdom",
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub input: InputConfig,
    pub filter: FilterConfig,
    pub folders: FolderReportConfig,
    pub search: SearchReportConfig,
    pub next_url: NextUrlReportConfig,
    pub export: ExportConfig,
}

//-----------------------------------------------------------------------------
// Input
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// A single log file (plain or compressed) or a directory of compressed archives.
    pub path: PathBuf,

    /// Processing order for directory inputs.
    pub order: InputOrder,

    /// File name suffix marking gzip-compressed input.
    pub suffix: String,

    /// Fail the run, rather than warn, when a source starts before the
    /// previous one ended.
    pub strict_order: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("nginx-logs"),
            order: InputOrder::default(),
            suffix: ".gz".to_string(),
            strict_order: false,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum InputOrder {
    /// logrotate numbering: `access.log.3.gz` before `access.log.2.gz`,
    /// un-numbered files last.
    #[default]
    ArchiveSequence,
    /// Lexical file name order, for date-stamped archives.
    Name,
    /// Oldest modification time first.
    Modified,
}

//-----------------------------------------------------------------------------
// Filtering
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Accepted response statuses. Empty accepts every status.
    pub statuses: Vec<u16>,

    /// Accepted request methods. Empty accepts every method.
    pub methods: Vec<String>,

    /// Case-insensitive user agent substrings identifying bots.
    pub bot_tokens: Vec<String>,

    /// Case-sensitive request target substrings to exclude.
    pub url_exclusions: Vec<String>,

    /// Also treat woothee's `crawler` category as bots.
    pub detect_crawlers: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            statuses: vec![200],
            methods: vec!["GET".to_string()],
            bot_tokens: DEFAULT_BOT_TOKENS.iter().map(|t| t.to_string()).collect(),
            url_exclusions: Vec::new(),
            detect_crawlers: false,
        }
    }
}

//-----------------------------------------------------------------------------
// Reports
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FolderReportConfig {
    /// Number of leading path segments forming the folder key.
    pub tier: usize,
    pub output: PathBuf,
}

impl FolderReportConfig {
    pub fn reduction(&self) -> Reduction {
        Reduction::Folder { tier: self.tier }
    }
}

impl Default for FolderReportConfig {
    fn default() -> Self {
        Self {
            tier: 2,
            output: PathBuf::from("folder_summary.csv"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchReportConfig {
    pub path_prefix: String,
    pub param: String,
    pub output: PathBuf,
}

impl SearchReportConfig {
    pub fn reduction(&self) -> Reduction {
        Reduction::QueryParam {
            prefix: self.path_prefix.clone(),
            param: self.param.clone(),
        }
    }
}

impl Default for SearchReportConfig {
    fn default() -> Self {
        Self {
            path_prefix: "/search".to_string(),
            param: "q".to_string(),
            output: PathBuf::from("search_terms_analysis.csv"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct NextUrlReportConfig {
    pub anchor_path: String,
    pub anchor_match: AnchorMatch,
    pub policy: AnchorPolicy,

    /// Prepend the `Total Hits` / `Date Range` block.
    pub summary_header: bool,

    pub output: PathBuf,
}

impl NextUrlReportConfig {
    pub fn anchor_rule(&self) -> AnchorRule {
        self.anchor_match.rule(&self.anchor_path)
    }
}

impl Default for NextUrlReportConfig {
    fn default() -> Self {
        Self {
            anchor_path: "/".to_string(),
            anchor_match: AnchorMatch::default(),
            policy: AnchorPolicy::default(),
            summary_header: true,
            output: PathBuf::from("analysis.csv"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub output: PathBuf,

    /// When set, only resolved anchors are exported, with a `next_url` column.
    pub anchor_path: Option<String>,
    pub anchor_match: AnchorMatch,
}

impl ExportConfig {
    pub fn anchor_rule(&self) -> Option<AnchorRule> {
        self.anchor_path
            .as_deref()
            .map(|path| self.anchor_match.rule(path))
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("export.csv"),
            anchor_path: None,
            anchor_match: AnchorMatch::default(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorMatch {
    #[default]
    Exact,
    Prefix,
}

impl AnchorMatch {
    pub fn rule(self, path: &str) -> AnchorRule {
        match self {
            AnchorMatch::Exact => AnchorRule::Exact(path.to_string()),
            AnchorMatch::Prefix => AnchorRule::Prefix(path.to_string()),
        }
    }
}
