//! Result records produced by the check pipeline

use serde::Serialize;

use crate::git::SyncStatus;

/// Outcome of checking one directory
pub type CheckOutcome = Result<BranchComparison, PipelineError>;

/// Ahead/behind comparison of a repository's head branch with its upstream
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BranchComparison {
    pub directory: String,
    pub branch_name: String,
    pub status: SyncStatus,
    pub ahead_by: u32,
    pub behind_by: u32,
}

impl BranchComparison {
    /// Builds a comparison whose status is derived from the counters
    pub fn new(
        directory: impl Into<String>,
        branch_name: impl Into<String>,
        ahead_by: u32,
        behind_by: u32,
    ) -> Self {
        Self {
            directory: directory.into(),
            branch_name: branch_name.into(),
            status: SyncStatus::derive(ahead_by, behind_by),
            ahead_by,
            behind_by,
        }
    }

    /// Row for a repository whose fetch failed: counters zeroed, failure as status
    pub fn degraded(
        directory: impl Into<String>,
        branch_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            branch_name: branch_name.into(),
            status: SyncStatus::Failed(message.into()),
            ahead_by: 0,
            behind_by: 0,
        }
    }

    /// Human readable counter summary, e.g. `3 to pull, 1 to push`
    pub fn info(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if self.behind_by > 0 {
            parts.push(format!("{} to pull", self.behind_by));
        }
        if self.ahead_by > 0 {
            parts.push(format!("{} to push", self.ahead_by));
        }
        parts.join(", ")
    }
}

/// A directory that could not be compared, with the reason why
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{directory}: {message}")]
pub struct PipelineError {
    pub directory: String,
    /// Absent only when the directory could not be opened as a repository
    pub branch_name: Option<String>,
    pub message: String,
    /// Present only for fetch failures, always with zeroed counters
    pub comparison: Option<BranchComparison>,
}

pub const NOT_A_REPOSITORY: &str = "Not a git repository";

impl PipelineError {
    pub fn new(
        directory: impl Into<String>,
        branch_name: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            branch_name,
            message: message.into(),
            comparison: None,
        }
    }

    pub fn not_a_repository(path: impl Into<String>) -> Self {
        Self::new(path, None, NOT_A_REPOSITORY)
    }

    /// Fetch failure carrying a degraded comparison so the branch still shows up
    pub fn fetch_failed(
        directory: impl Into<String>,
        branch_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let directory = directory.into();
        let branch_name = branch_name.into();
        let message = message.into();
        Self {
            comparison: Some(BranchComparison::degraded(
                directory.clone(),
                branch_name.clone(),
                message.clone(),
            )),
            directory,
            branch_name: Some(branch_name),
            message,
        }
    }
}
