mod check;
mod dump;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Config file (defaults to ./clickpath.hcl, or built-in defaults)
        path: Option<PathBuf>,

        /// Print issues without color
        #[arg(short, long)]
        plain: bool,
    },

    /// Print resolved configuration
    Dump {
        path: Option<PathBuf>,

        /// Output as JSON
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,
    },
}

impl ConfigCmd {
    pub fn run(self, fallback: Option<PathBuf>) -> anyhow::Result<()> {
        match self {
            ConfigCmd::Check { path, plain } => check(path.or(fallback), plain),
            ConfigCmd::Dump { path, json, yaml } => dump(path.or(fallback), json, yaml),
        }
    }
}
