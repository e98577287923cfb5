//! Test fixtures and builders

use anyhow::Result;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tempfile::TempDir;

use git_drift::core::Config;

use super::git::{clone_repo, configure_identity, create_commits, create_test_commit, git, setup_git_repo};

/// A directory of working copies plus the bare repositories they clone from,
/// removed when dropped
pub struct Forest {
    pub temp_dir: TempDir,
}

impl Forest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        std::fs::create_dir_all(temp_dir.path().join("work"))?;
        std::fs::create_dir_all(temp_dir.path().join("remotes"))?;
        Ok(Self { temp_dir })
    }

    /// Directory holding the working copies; the scan root
    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join("work")
    }

    /// Directory holding the bare "remote" repositories
    pub fn remotes(&self) -> PathBuf {
        self.temp_dir.path().join("remotes")
    }

    /// Config whose host policy accepts every remote of this forest
    pub fn config(&self) -> Config {
        Config {
            git_username: "test".to_string(),
            git_password: "test".to_string(),
            remote_must_match: self.remotes().to_string_lossy().into_owned(),
            ignores: BTreeSet::new(),
        }
    }

    pub fn working_copy(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    fn remote(&self, name: &str) -> PathBuf {
        self.remotes().join(format!("{name}.git"))
    }

    /// Creates a bare remote seeded with one commit on `main` and a working copy
    /// cloned from it, so `main` tracks `origin/main`
    pub fn add_tracked_repo(&self, name: &str) -> Result<PathBuf> {
        let seed = self.temp_dir.path().join("seeds").join(name);
        std::fs::create_dir_all(&seed)?;
        setup_git_repo(&seed)?;
        create_test_commit(&seed, "README.md", &format!("# {name}"), "Initial commit")?;

        clone_repo(&seed, &self.remote(name), true)?;

        let work = self.working_copy(name);
        clone_repo(&self.remote(name), &work, false)?;
        configure_identity(&work)?;
        Ok(work)
    }

    /// Creates a repository with commits but without any remote
    pub fn add_local_repo(&self, name: &str) -> Result<PathBuf> {
        let work = self.working_copy(name);
        std::fs::create_dir_all(&work)?;
        setup_git_repo(&work)?;
        create_test_commit(&work, "README.md", &format!("# {name}"), "Initial commit")?;
        Ok(work)
    }

    /// Commits locally in the working copy without pushing
    pub fn commit_locally(&self, name: &str, count: usize) -> Result<()> {
        create_commits(&self.working_copy(name), "local", count)
    }

    /// Pushes `count` new commits to the remote from a separate clone
    pub fn commit_upstream(&self, name: &str, count: usize) -> Result<()> {
        let scratch = self.temp_dir.path().join("scratch").join(name);
        if !scratch.exists() {
            clone_repo(&self.remote(name), &scratch, false)?;
            configure_identity(&scratch)?;
        } else {
            git(&scratch, &["pull", "-q", "--ff-only"])?;
        }
        create_commits(&scratch, "upstream", count)?;
        git(&scratch, &["push", "-q", "origin", "main"])?;
        Ok(())
    }

    /// Points the working copy's origin somewhere else
    pub fn set_origin_url(&self, name: &str, url: &str) -> Result<()> {
        git(&self.working_copy(name), &["remote", "set-url", "origin", url])?;
        Ok(())
    }

    /// Writes a file without staging it
    pub fn write_untracked(&self, name: &str, file: &str) -> Result<()> {
        std::fs::write(self.working_copy(name).join(file), "scratch")?;
        Ok(())
    }
}
