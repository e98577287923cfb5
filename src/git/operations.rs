//! Basic git command execution

use anyhow::Result;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use crate::core::config::GIT_OPERATION_TIMEOUT_SECS;

const GIT_CONFIG_GET_ARGS: &[&str] = &["config", "--get"];

// ssh must fail instead of prompting for a passphrase or host key
const SSH_COMMAND_ENV: &str = "GIT_SSH_COMMAND";
const BATCH_SSH_COMMAND: &str = "ssh -o BatchMode=yes";

/// Output of a finished git command: (success, stdout, stderr), both streams trimmed
pub type GitOutput = (bool, String, String);

/// Runs a git command in the specified directory with a timeout
/// Returns (success, stdout, stderr)
pub async fn run_git(path: &Path, args: &[&str]) -> Result<GitOutput> {
    run_git_with_env(path, args, &[]).await
}

/// Runs a git command with extra environment variables set only on the child process
///
/// Values passed here never show up in the child's argument list, which is what makes
/// this the right channel for credentials.
pub async fn run_git_with_env(
    path: &Path,
    args: &[&str],
    envs: &[(&str, &str)],
) -> Result<GitOutput> {
    let timeout_duration = Duration::from_secs(GIT_OPERATION_TIMEOUT_SECS);
    debug!(path = %path.display(), ?args, "running git");

    let mut command = Command::new("git");
    command
        .args(args)
        .current_dir(path)
        .env("GIT_TERMINAL_PROMPT", "0")
        .kill_on_drop(true);
    // A user-supplied ssh command (custom key, jump host) is left alone
    if std::env::var_os(SSH_COMMAND_ENV).is_none() {
        command.env(SSH_COMMAND_ENV, BATCH_SSH_COMMAND);
    }
    for (key, value) in envs {
        command.env(key, value);
    }

    let result = tokio::time::timeout(timeout_duration, command.output()).await;

    match result {
        Ok(Ok(output)) => Ok((
            output.status.success(),
            String::from_utf8_lossy(&output.stdout).trim().to_string(),
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        )),
        Ok(Err(e)) => Err(e.into()),
        Err(_) => Err(anyhow::anyhow!(
            "Git operation timed out after {} seconds",
            GIT_OPERATION_TIMEOUT_SECS
        )),
    }
}

/// Reads a git config value from the specified repository
/// Returns the config value if it exists, None if not found
pub(crate) async fn get_git_config(path: &Path, key: &str) -> Result<Option<String>> {
    let mut args = Vec::from(GIT_CONFIG_GET_ARGS);
    args.push(key);

    match run_git(path, &args).await {
        Ok((true, value, _)) => {
            if value.is_empty() {
                Ok(None)
            } else {
                Ok(Some(value))
            }
        }
        Ok((false, _, _)) => Ok(None), // Key not found
        Err(e) => Err(e),
    }
}

/// Parses the output of `git rev-list --left-right --count A...B` into (left, right)
pub(crate) fn parse_left_right_counts(output: &str) -> Option<(u32, u32)> {
    let mut parts = output.split_whitespace();
    let left = parts.next()?.parse().ok()?;
    let right = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((left, right))
}
