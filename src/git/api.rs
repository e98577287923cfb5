//! Public API for git access.
//!
//! This module provides the stable public API for git-related functionality:
//! - The repository capability traits used by the check pipeline
//! - The `git` CLI backend implementing them
//! - Branch sync status
//!
//! ## Example: Reading the head branch
//!
//! ```rust,no_run
//! use git_drift::git::{GitCli, RepositoryHandle, RepositoryOpener};
//! use std::path::Path;
//!
//! async fn show(path: &Path) -> anyhow::Result<()> {
//!     if let Some(repo) = GitCli.open(path).await {
//!         let head = repo.head_branch().await?;
//!         println!("{} tracks {:?}", head.name, head.upstream_remote);
//!     }
//!     Ok(())
//! }
//! ```

// Capabilities
pub use super::handle::{
    CredentialProvider, Credentials, HeadBranch, RepositoryHandle, RepositoryOpener,
    TransportError,
};

// CLI backend
pub use super::cli::{CliRepository, GitCli};

// Status
pub use super::status::SyncStatus;

