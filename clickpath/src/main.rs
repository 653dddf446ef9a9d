use anyhow::Context;
use clap::{Parser, Subcommand};
use clickpath_core::cli::conf::ConfigCmd;
use clickpath_core::cli::report::ReportCmd;
use clickpath_core::conf::load_or_default;
use clickpath_core::logging::{LogFormat, default_log_format, init_logging};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    name = "clickpath",
    version,
    about = "clickpath: navigation and traffic reports from web server access logs"
)]
struct Cli {
    /// HCL config file (defaults to ./clickpath.hcl when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log output format on stderr (defaults to pretty on a terminal, json otherwise)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Report(ReportCmd),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Config { cmd } => {
            if let Err(e) = cmd.run(cli.config) {
                eprintln!("config error: {e:#}");
                return ExitCode::FAILURE;
            }
        }

        Command::Report(cmd) => {
            init_logging(cli.log_format.unwrap_or_else(default_log_format));

            if let Err(e) = run_report(&cmd, cli.config) {
                error!("{e:#}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn run_report(cmd: &ReportCmd, config: Option<PathBuf>) -> anyhow::Result<()> {
    let mut cfg = load_or_default(config.as_deref()).context("failed to load configuration")?;
    cmd.apply(&mut cfg);
    cmd.run(&cfg).context("run failed")?;
    Ok(())
}
