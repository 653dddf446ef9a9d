use crate::conf::{AnalysisConfig, ConfigError, ValidationIssue, load_or_default};
use owo_colors::OwoColorize;
use std::path::PathBuf;

pub fn check(path: Option<PathBuf>, plain: bool) -> anyhow::Result<()> {
    let cfg = load_or_default(path.as_deref())?;

    match cfg.validate() {
        Ok(()) => {
            print!("{}", render_summary(&cfg));
            Ok(())
        }
        Err(ConfigError::Validation { issues }) => {
            eprint!("{}", render_issues(&issues, plain));
            anyhow::bail!("configuration is invalid")
        }
        Err(e) => Err(e.into()),
    }
}

pub fn render_summary(cfg: &AnalysisConfig) -> String {
    let methods = if cfg.filter.methods.is_empty() {
        "any method".to_string()
    } else {
        cfg.filter.methods.join(", ")
    };
    let statuses = if cfg.filter.statuses.is_empty() {
        "any status".to_string()
    } else {
        cfg.filter
            .statuses
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "✔ Config loaded successfully\n\
         ✔ input {} ({:?} order)\n\
         ✔ status {} / {}\n\
         ✔ {} bot tokens, {} url exclusions{}\n\
         ✔ folders at tier {}\n\
         ✔ next url anchor {} ({:?}, {:?})\n",
        cfg.input.path.display(),
        cfg.input.order,
        statuses,
        methods,
        cfg.filter.bot_tokens.len(),
        cfg.filter.url_exclusions.len(),
        if cfg.filter.detect_crawlers {
            ", crawler detection on"
        } else {
            ""
        },
        cfg.folders.tier,
        cfg.next_url.anchor_path,
        cfg.next_url.anchor_match,
        cfg.next_url.policy,
    )
}

pub fn render_issues(issues: &[ValidationIssue], plain: bool) -> String {
    let mut out = format!("configuration validation failed ({} errors)\n\n", issues.len());

    for issue in issues {
        if plain {
            out.push_str(&format!("  error: {}: {}\n", issue.field, issue.message));
        } else {
            out.push_str(&format!(
                "  {}: {}: {}\n",
                "error".red().bold(),
                issue.field.bold(),
                issue.message
            ));
        }
    }
    out
}
