//! Capability traits for opened repositories and credential supply
//!
//! The check pipeline only talks to a repository through [`RepositoryHandle`], so
//! the same validation and comparison logic runs against the git CLI backend and
//! against in-memory fakes in tests.

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// The branch HEAD points at, with its tracking information
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeadBranch {
    pub name: String,
    /// Remote named by `branch.<name>.remote`, if the branch tracks one
    pub upstream_remote: Option<String>,
    /// Commits on HEAD missing from the upstream ref; `None` when unknown
    pub ahead_by: Option<u32>,
    /// Commits on the upstream ref missing from HEAD; `None` when unknown
    pub behind_by: Option<u32>,
}

impl HeadBranch {
    /// Whether the branch's upstream lives on `remote`
    pub fn tracks(&self, remote: &str) -> bool {
        self.upstream_remote.as_deref() == Some(remote)
    }
}

/// Username/password pair handed to an authenticated fetch
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Supplies credentials on demand; queried again for every fetch
pub trait CredentialProvider: Send + Sync {
    fn credentials(&self) -> Credentials;
}

impl<F> CredentialProvider for F
where
    F: Fn() -> Credentials + Send + Sync,
{
    fn credentials(&self) -> Credentials {
        self()
    }
}

/// Failure reported by the transport while fetching
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An opened local repository
#[async_trait]
pub trait RepositoryHandle: Send + Sync {
    /// The branch HEAD currently points at
    async fn head_branch(&self) -> Result<HeadBranch>;

    /// URL of the named remote, `None` when no such remote exists
    async fn remote_url(&self, name: &str) -> Result<Option<String>>;

    /// Whether the working tree has modified, added, removed or untracked entries
    async fn is_dirty(&self) -> Result<bool>;

    /// Fetches every ref-spec configured on `remote`
    async fn fetch(
        &self,
        remote: &str,
        credentials: &dyn CredentialProvider,
    ) -> std::result::Result<(), TransportError>;
}

#[async_trait]
impl<T: RepositoryHandle + ?Sized> RepositoryHandle for Arc<T> {
    async fn head_branch(&self) -> Result<HeadBranch> {
        (**self).head_branch().await
    }

    async fn remote_url(&self, name: &str) -> Result<Option<String>> {
        (**self).remote_url(name).await
    }

    async fn is_dirty(&self) -> Result<bool> {
        (**self).is_dirty().await
    }

    async fn fetch(
        &self,
        remote: &str,
        credentials: &dyn CredentialProvider,
    ) -> std::result::Result<(), TransportError> {
        (**self).fetch(remote, credentials).await
    }
}

/// Opens directories as repositories
#[async_trait]
pub trait RepositoryOpener: Send + Sync {
    type Handle: RepositoryHandle;

    /// Returns `None` when `path` is not a git repository
    async fn open(&self, path: &Path) -> Option<Self::Handle>;
}
