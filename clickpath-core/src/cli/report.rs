use crate::RunError;
use crate::conf::AnalysisConfig;
use crate::conf::types::{AnchorMatch, InputOrder};
use crate::correlate::AnchorPolicy;
use crate::pipeline::{self, RunStats};
use clap::{Args, Subcommand};
use std::io;
use std::path::PathBuf;

/// Input and filter overrides shared by every report.
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    /// Log file, or directory of compressed archives
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Processing order for directory input
    #[arg(long, value_enum)]
    pub order: Option<InputOrder>,

    /// Fail when an archive starts before the previous one ended
    #[arg(long)]
    pub strict_order: bool,

    /// Accept every response status, not just the configured ones
    #[arg(long)]
    pub any_status: bool,

    /// Accept every request method, not just the configured ones
    #[arg(long)]
    pub any_method: bool,

    /// Also treat user agents classified as crawlers as bots
    #[arg(long)]
    pub detect_crawlers: bool,
}

impl InputArgs {
    pub fn apply(&self, cfg: &mut AnalysisConfig) {
        if let Some(input) = &self.input {
            cfg.input.path = input.clone();
        }
        if let Some(order) = self.order {
            cfg.input.order = order;
        }
        if self.strict_order {
            cfg.input.strict_order = true;
        }
        if self.any_status {
            cfg.filter.statuses.clear();
        }
        if self.any_method {
            cfg.filter.methods.clear();
        }
        if self.detect_crawlers {
            cfg.filter.detect_crawlers = true;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ReportCmd {
    /// Hits and distinct subpages per folder
    Folders {
        #[command(flatten)]
        input: InputArgs,

        /// Number of leading path segments forming a folder
        #[arg(short, long)]
        tier: Option<usize>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Site search term frequencies
    Search {
        #[command(flatten)]
        input: InputArgs,

        /// Path prefix of the search endpoint
        #[arg(long)]
        prefix: Option<String>,

        /// Query parameter carrying the search term
        #[arg(long)]
        param: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Where clients went right after an anchor request
    NextUrl {
        #[command(flatten)]
        input: InputArgs,

        /// Anchor request path
        #[arg(long)]
        anchor: Option<String>,

        /// Treat the anchor as a path prefix
        #[arg(long)]
        prefix_match: bool,

        #[arg(long, value_enum)]
        policy: Option<AnchorPolicy>,

        /// Omit the Total Hits / Date Range block
        #[arg(long)]
        no_summary: bool,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Filtered records as CSV
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Only export resolved anchors with this path, plus their next URL
        #[arg(long)]
        anchor: Option<String>,

        #[arg(long)]
        prefix_match: bool,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the first parsed records as JSON lines
    Sample {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short = 'n', long, default_value_t = 3)]
        count: usize,
    },
}

impl ReportCmd {
    /// Folds command-line overrides into `cfg`.
    pub fn apply(&self, cfg: &mut AnalysisConfig) {
        match self {
            ReportCmd::Folders {
                input,
                tier,
                output,
            } => {
                input.apply(cfg);
                if let Some(tier) = tier {
                    cfg.folders.tier = *tier;
                }
                if let Some(output) = output {
                    cfg.folders.output = output.clone();
                }
            }
            ReportCmd::Search {
                input,
                prefix,
                param,
                output,
            } => {
                input.apply(cfg);
                if let Some(prefix) = prefix {
                    cfg.search.path_prefix = prefix.clone();
                }
                if let Some(param) = param {
                    cfg.search.param = param.clone();
                }
                if let Some(output) = output {
                    cfg.search.output = output.clone();
                }
            }
            ReportCmd::NextUrl {
                input,
                anchor,
                prefix_match,
                policy,
                no_summary,
                output,
            } => {
                input.apply(cfg);
                if let Some(anchor) = anchor {
                    cfg.next_url.anchor_path = anchor.clone();
                }
                if *prefix_match {
                    cfg.next_url.anchor_match = AnchorMatch::Prefix;
                }
                if let Some(policy) = policy {
                    cfg.next_url.policy = *policy;
                }
                if *no_summary {
                    cfg.next_url.summary_header = false;
                }
                if let Some(output) = output {
                    cfg.next_url.output = output.clone();
                }
            }
            ReportCmd::Export {
                input,
                anchor,
                prefix_match,
                output,
            } => {
                input.apply(cfg);
                if anchor.is_some() {
                    cfg.export.anchor_path = anchor.clone();
                }
                if *prefix_match {
                    cfg.export.anchor_match = AnchorMatch::Prefix;
                }
                if let Some(output) = output {
                    cfg.export.output = output.clone();
                }
            }
            ReportCmd::Sample { input, .. } => input.apply(cfg),
        }
    }

    pub fn run(&self, cfg: &AnalysisConfig) -> Result<RunStats, RunError> {
        match self {
            ReportCmd::Folders { .. } => pipeline::run_folders(cfg),
            ReportCmd::Search { .. } => pipeline::run_search(cfg),
            ReportCmd::NextUrl { .. } => pipeline::run_next_url(cfg),
            ReportCmd::Export { .. } => pipeline::run_export(cfg),
            ReportCmd::Sample { count, .. } => pipeline::sample(cfg, *count, io::stdout().lock()),
        }
    }
}
