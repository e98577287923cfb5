//! Repository handle backed by the `git` command line

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::handle::{
    CredentialProvider, Credentials, HeadBranch, RepositoryHandle, RepositoryOpener, TransportError,
};
use super::operations::{get_git_config, parse_left_right_counts, run_git, run_git_with_env};

// Git command arguments
const GIT_IS_WORK_TREE_ARGS: &[&str] = &["rev-parse", "--is-inside-work-tree"];
const GIT_SYMBOLIC_REF_ARGS: &[&str] = &["symbolic-ref", "--quiet", "--short", "HEAD"];
const GIT_SHORT_HEAD_ARGS: &[&str] = &["rev-parse", "--short", "HEAD"];
const GIT_AHEAD_BEHIND_ARGS: &[&str] = &["rev-list", "--left-right", "--count", "HEAD...@{upstream}"];
const GIT_STATUS_PORCELAIN_ARGS: &[&str] = &["status", "--porcelain"];

// Environment variables read by the inline credential helper
const USERNAME_ENV: &str = "GIT_DRIFT_FETCH_USERNAME";
const PASSWORD_ENV: &str = "GIT_DRIFT_FETCH_PASSWORD";
const CREDENTIAL_HELPER: &str = "credential.helper=!f() { test \"$1\" = get || return 0; \
echo \"username=${GIT_DRIFT_FETCH_USERNAME}\"; echo \"password=${GIT_DRIFT_FETCH_PASSWORD}\"; }; f";
// Clears any user-configured helper, then installs ours
const CREDENTIAL_ARGS: [&str; 4] = ["-c", "credential.helper=", "-c", CREDENTIAL_HELPER];

fn credential_env(credentials: &Credentials) -> [(&'static str, &str); 2] {
    [
        (USERNAME_ENV, credentials.username.as_str()),
        (PASSWORD_ENV, credentials.password.as_str()),
    ]
}

/// Opens repositories by asking the `git` binary about them
#[derive(Clone, Copy, Debug, Default)]
pub struct GitCli;

#[async_trait]
impl RepositoryOpener for GitCli {
    type Handle = CliRepository;

    async fn open(&self, path: &Path) -> Option<CliRepository> {
        // A sub-folder of some other working copy must not pass as a repository
        if !path.join(".git").exists() {
            return None;
        }
        match run_git(path, GIT_IS_WORK_TREE_ARGS).await {
            Ok((true, output, _)) if output == "true" => Some(CliRepository {
                path: path.to_path_buf(),
            }),
            Ok(_) => None,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "could not run git");
                None
            }
        }
    }
}

/// A working copy queried through `git` subprocesses
#[derive(Clone, Debug)]
pub struct CliRepository {
    path: PathBuf,
}

impl CliRepository {
    async fn branch_name(&self) -> Result<String> {
        if let (true, name, _) = run_git(&self.path, GIT_SYMBOLIC_REF_ARGS).await? {
            if !name.is_empty() {
                return Ok(name);
            }
        }
        // Detached HEAD: name it by its abbreviated commit
        match run_git(&self.path, GIT_SHORT_HEAD_ARGS).await? {
            (true, sha, _) if !sha.is_empty() => Ok(sha),
            (_, _, stderr) => Err(anyhow::anyhow!("Cannot resolve HEAD: {stderr}")),
        }
    }

    async fn ahead_behind(&self) -> Result<Option<(u32, u32)>> {
        match run_git(&self.path, GIT_AHEAD_BEHIND_ARGS).await? {
            (true, output, _) => Ok(parse_left_right_counts(&output)),
            // Upstream ref not fetched yet, or HEAD unborn
            (false, _, _) => Ok(None),
        }
    }
}

#[async_trait]
impl RepositoryHandle for CliRepository {
    async fn head_branch(&self) -> Result<HeadBranch> {
        let name = self
            .branch_name()
            .await
            .with_context(|| format!("Reading HEAD in {}", self.path.display()))?;
        let upstream_remote = get_git_config(&self.path, &format!("branch.{name}.remote")).await?;
        let counts = if upstream_remote.is_some() {
            self.ahead_behind().await?
        } else {
            None
        };

        Ok(HeadBranch {
            name,
            upstream_remote,
            ahead_by: counts.map(|(ahead, _)| ahead),
            behind_by: counts.map(|(_, behind)| behind),
        })
    }

    async fn remote_url(&self, name: &str) -> Result<Option<String>> {
        get_git_config(&self.path, &format!("remote.{name}.url")).await
    }

    async fn is_dirty(&self) -> Result<bool> {
        match run_git(&self.path, GIT_STATUS_PORCELAIN_ARGS).await? {
            (true, output, _) => Ok(!output.is_empty()),
            (false, _, stderr) => Err(anyhow::anyhow!("git status failed: {stderr}")),
        }
    }

    async fn fetch(
        &self,
        remote: &str,
        credentials: &dyn CredentialProvider,
    ) -> Result<(), TransportError> {
        let creds = credentials.credentials();
        let mut args = CREDENTIAL_ARGS.to_vec();
        args.extend(["fetch", "--quiet", remote]);

        match run_git_with_env(&self.path, &args, &credential_env(&creds)).await {
            Ok((true, _, _)) => Ok(()),
            Ok((false, _, stderr)) => Err(TransportError::new(stderr)),
            Err(e) => Err(TransportError::new(e.to_string())),
        }
    }
}
