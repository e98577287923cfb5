//! In-memory repository used by the pipeline unit tests

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::git::{
    CredentialProvider, Credentials, HeadBranch, RepositoryHandle, RepositoryOpener,
    TransportError,
};

#[derive(Debug)]
pub(crate) struct FakeRepo {
    head: Mutex<HeadBranch>,
    /// Head as it looks once a fetch succeeded
    fetched_head: Option<HeadBranch>,
    remotes: HashMap<String, String>,
    dirty: bool,
    head_error: Option<String>,
    fetch_error: Option<String>,
    fetch_log: Mutex<Vec<Credentials>>,
}

impl FakeRepo {
    /// Clean repository whose branch tracks an approved origin and is in sync
    pub(crate) fn healthy(branch: &str) -> Self {
        let mut remotes = HashMap::new();
        remotes.insert(
            "origin".to_string(),
            "https://github.com/acme/api.git".to_string(),
        );
        Self {
            head: Mutex::new(HeadBranch {
                name: branch.to_string(),
                upstream_remote: Some("origin".to_string()),
                ahead_by: Some(0),
                behind_by: Some(0),
            }),
            fetched_head: None,
            remotes,
            dirty: false,
            head_error: None,
            fetch_error: None,
            fetch_log: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn without_origin(mut self) -> Self {
        self.remotes.remove("origin");
        self
    }

    pub(crate) fn with_remote(mut self, name: &str, url: &str) -> Self {
        self.remotes.insert(name.to_string(), url.to_string());
        self
    }

    pub(crate) fn tracking(self, remote: Option<&str>) -> Self {
        self.head.lock().unwrap().upstream_remote = remote.map(str::to_string);
        self
    }

    pub(crate) fn with_counters(self, ahead: u32, behind: u32) -> Self {
        {
            let mut head = self.head.lock().unwrap();
            head.ahead_by = Some(ahead);
            head.behind_by = Some(behind);
        }
        self
    }

    pub(crate) fn after_fetch(mut self, ahead: u32, behind: u32) -> Self {
        let mut head = self.head.lock().unwrap().clone();
        head.ahead_by = Some(ahead);
        head.behind_by = Some(behind);
        self.fetched_head = Some(head);
        self
    }

    pub(crate) fn dirty(mut self) -> Self {
        self.dirty = true;
        self
    }

    pub(crate) fn unreadable_head(mut self, message: &str) -> Self {
        self.head_error = Some(message.to_string());
        self
    }

    pub(crate) fn failing_fetch(mut self, message: &str) -> Self {
        self.fetch_error = Some(message.to_string());
        self
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.fetch_log.lock().unwrap().len()
    }

    pub(crate) fn seen_credentials(&self) -> Vec<Credentials> {
        self.fetch_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepositoryHandle for FakeRepo {
    async fn head_branch(&self) -> Result<HeadBranch> {
        if let Some(message) = &self.head_error {
            anyhow::bail!("{message}");
        }
        Ok(self.head.lock().unwrap().clone())
    }

    async fn remote_url(&self, name: &str) -> Result<Option<String>> {
        Ok(self.remotes.get(name).cloned())
    }

    async fn is_dirty(&self) -> Result<bool> {
        Ok(self.dirty)
    }

    async fn fetch(
        &self,
        remote: &str,
        credentials: &dyn CredentialProvider,
    ) -> Result<(), TransportError> {
        assert_eq!(remote, "origin");
        self.fetch_log.lock().unwrap().push(credentials.credentials());
        if let Some(message) = &self.fetch_error {
            return Err(TransportError::new(message.clone()));
        }
        if let Some(fetched) = &self.fetched_head {
            *self.head.lock().unwrap() = fetched.clone();
        }
        Ok(())
    }
}

/// Opens only the paths registered with [`FakeOpener::with`]
#[derive(Default)]
pub(crate) struct FakeOpener {
    repos: HashMap<PathBuf, Arc<FakeRepo>>,
}

impl FakeOpener {
    pub(crate) fn with(mut self, path: &str, repo: FakeRepo) -> Self {
        self.repos.insert(PathBuf::from(path), Arc::new(repo));
        self
    }

    pub(crate) fn repo(&self, path: &str) -> Arc<FakeRepo> {
        Arc::clone(&self.repos[Path::new(path)])
    }
}

#[async_trait]
impl RepositoryOpener for FakeOpener {
    type Handle = Arc<FakeRepo>;

    async fn open(&self, path: &Path) -> Option<Arc<FakeRepo>> {
        self.repos.get(path).cloned()
    }
}
