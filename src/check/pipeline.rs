//! Per-directory pipeline: open, validate, fetch, compare
//!
//! Each stage either hands its result to the next one or ends the pipeline with a
//! [`PipelineError`]. Failures stay local to their directory; `run_checks` always
//! produces exactly one outcome per input path.

use std::path::{Path, PathBuf};
use tracing::debug;

use super::compare::compare_branch;
use super::fetch::{fetch_origin, FetchFailure};
use super::types::{BranchComparison, CheckOutcome, PipelineError};
use super::validation::{query_error_message, validate};
use crate::core::{repo_label, Config};
use crate::git::{CredentialProvider, RepositoryHandle, RepositoryOpener};

/// Progress hook, called once per directory right before validation
pub type ProgressFn<'a> = &'a (dyn Fn(&Path) + Sync);

/// Fetch from origin followed by the branch comparison, run on a validated repository
pub struct FetchAndCompare<'a> {
    credentials: &'a dyn CredentialProvider,
}

impl<'a> FetchAndCompare<'a> {
    pub fn new(credentials: &'a dyn CredentialProvider) -> Self {
        Self { credentials }
    }

    /// Fetches, then re-reads the head branch so the counters reflect the new refs
    pub async fn run<H>(&self, directory: &str, repo: &H) -> Result<BranchComparison, FetchFailure>
    where
        H: RepositoryHandle + ?Sized,
    {
        fetch_origin(self.credentials, directory, repo).await?;
        let head = repo
            .head_branch()
            .await
            .map_err(|e| FetchFailure::Unclassified(query_error_message(&e)))?;
        Ok(compare_branch(directory, &head))
    }
}

/// Checks a single directory
///
/// The repository handle lives only for the duration of this call and is dropped
/// on every exit path.
pub async fn check_directory<O>(
    opener: &O,
    remote_must_match: &str,
    fetch_and_compare: &FetchAndCompare<'_>,
    progress: ProgressFn<'_>,
    path: &Path,
) -> CheckOutcome
where
    O: RepositoryOpener + ?Sized,
{
    let Some(repo) = opener.open(path).await else {
        debug!(path = %path.display(), "not a git repository");
        return Err(PipelineError::not_a_repository(path.display().to_string()));
    };
    let directory = repo_label(path);

    progress(path);

    let head = validate(&directory, &repo, remote_must_match).await?;

    let comparison = fetch_and_compare
        .run(&directory, &repo)
        .await
        .map_err(|failure| PipelineError::fetch_failed(&directory, &head.name, failure.message()))?;

    debug!(
        directory,
        branch = %comparison.branch_name,
        status = %comparison.status,
        "check finished"
    );
    Ok(comparison)
}

/// Checks every directory in order, one at a time
pub async fn run_checks<O>(
    opener: &O,
    config: &Config,
    paths: &[PathBuf],
    progress: ProgressFn<'_>,
) -> Vec<CheckOutcome>
where
    O: RepositoryOpener + ?Sized,
{
    let provider = || config.credentials();
    let fetch_and_compare = FetchAndCompare::new(&provider);

    let mut outcomes = Vec::with_capacity(paths.len());
    for path in paths {
        let outcome = check_directory(
            opener,
            &config.remote_must_match,
            &fetch_and_compare,
            progress,
            path,
        )
        .await;
        outcomes.push(outcome);
    }
    outcomes
}
