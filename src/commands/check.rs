//! Drift check command implementation
//!
//! Discovers every working copy under the root, runs the check pipeline on each
//! one in turn and prints the report.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::report::{render_json, render_table};
use crate::check::run_checks;
use crate::core::{
    init_command, set_terminal_title, set_terminal_title_and_flush, CheckProgress,
    CheckStatistics, Config, APP_NAME, NO_REPOS_MESSAGE, SCANNING_MESSAGE,
};
use crate::git::GitCli;

/// Options for a check run
#[derive(Clone, Debug)]
pub struct CheckArgs {
    pub root: PathBuf,
    pub config: Option<PathBuf>,
    pub json: bool,
}

/// Handles the check command, returning the run's statistics
pub async fn handle_check_command(args: CheckArgs) -> Result<CheckStatistics> {
    // Config problems are fatal and must surface before any repository is touched
    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    tracing::debug!(?config, root = %args.root.display(), "configuration loaded");

    set_terminal_title(&format!("🔍 {APP_NAME}"));

    let result = check_root(&args, &config).await;

    set_terminal_title_and_flush(&format!("✅ {APP_NAME}"));
    result
}

async fn check_root(args: &CheckArgs, config: &Config) -> Result<CheckStatistics> {
    let interactive = !args.json;
    // Canonical root so a repository at `.` is labelled by its real folder name
    let root = std::fs::canonicalize(&args.root)
        .with_context(|| format!("Cannot read directory {}", args.root.display()))?;
    let (start_time, repos) =
        init_command(SCANNING_MESSAGE, &root, &config.ignores, interactive).await;

    if repos.is_empty() {
        if args.json {
            println!("{}", render_json(&[])?);
        } else {
            println!("{NO_REPOS_MESSAGE}");
        }
        return Ok(CheckStatistics::new());
    }

    let progress = CheckProgress::new(repos.len(), interactive)?;
    let report = |path: &Path| progress.report(path);
    let outcomes = run_checks(&GitCli, config, &repos, &report).await;
    progress.finish();

    let statistics = CheckStatistics::from_outcomes(&outcomes);
    if args.json {
        println!("{}", render_json(&outcomes)?);
    } else {
        print!("{}", render_table(&outcomes));
        println!();
        println!("{}", statistics.generate_summary(start_time.elapsed()));
    }

    Ok(statistics)
}
