//! Sync-safety preconditions checked before anything touches the network

use super::types::PipelineError;
use crate::git::{HeadBranch, RepositoryHandle};

/// The only remote this tool looks at
pub const ORIGIN: &str = "origin";

/// Branch label used when HEAD itself cannot be read
pub const UNKNOWN_BRANCH: &str = "HEAD";

/// First precondition a repository failed; checks run in declaration order
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("No origin remote")]
    NoOriginRemote,
    /// Origin URL does not contain the configured pattern; we never fetch from it
    #[error("Not checked (external)")]
    HostMismatch,
    #[error("Not tracking origin remote")]
    NotTrackingOrigin,
    #[error("UNCOMMITTED")]
    UncommittedChanges,
}

/// Collapses an error chain into a single display line
pub(crate) fn query_error_message(err: &anyhow::Error) -> String {
    format!("{err:#}").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Runs the four checks against `repo`, stopping at the first failure
///
/// Returns the head branch that passed validation so later stages report the
/// same branch name.
pub async fn validate<H>(
    directory: &str,
    repo: &H,
    remote_must_match: &str,
) -> Result<HeadBranch, PipelineError>
where
    H: RepositoryHandle + ?Sized,
{
    let head = repo
        .head_branch()
        .await
        .map_err(|e| {
            PipelineError::new(directory, Some(UNKNOWN_BRANCH.to_string()), query_error_message(&e))
        })?;

    let fail = |failure: ValidationFailure| {
        tracing::debug!(directory, branch = %head.name, %failure, "validation failed");
        PipelineError::new(directory, Some(head.name.clone()), failure.to_string())
    };
    let query_failed =
        |e: anyhow::Error| PipelineError::new(directory, Some(head.name.clone()), query_error_message(&e));

    let origin_url = match repo.remote_url(ORIGIN).await.map_err(query_failed)? {
        Some(url) => url,
        None => return Err(fail(ValidationFailure::NoOriginRemote)),
    };

    if !origin_url.contains(remote_must_match) {
        return Err(fail(ValidationFailure::HostMismatch));
    }

    if !head.tracks(ORIGIN) {
        return Err(fail(ValidationFailure::NotTrackingOrigin));
    }

    if repo.is_dirty().await.map_err(query_failed)? {
        return Err(fail(ValidationFailure::UncommittedChanges));
    }

    Ok(head)
}
