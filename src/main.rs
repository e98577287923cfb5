//! git-drift: reports which git working copies under a directory have drifted from origin

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use git_drift::commands::{handle_check_command, CheckArgs};

/// Report ahead/behind status of every git repository under a directory
#[derive(Parser, Debug)]
#[command(name = "git-drift", version, about)]
struct Cli {
    /// Directory to scan for repositories
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Settings file (defaults to ~/.config/git-drift/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Exit with status 1 when any repository is not OK
    #[arg(long)]
    strict: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "git_drift=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let statistics = handle_check_command(CheckArgs {
        root: cli.root,
        config: cli.config,
        json: cli.json,
    })
    .await?;

    if cli.strict && !statistics.all_ok() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
