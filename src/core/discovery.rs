//! Repository discovery

use dashmap::DashSet;
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::config::{ESTIMATED_REPO_COUNT, MAX_SCAN_DEPTH, SKIP_DIRECTORIES};

/// Check if a .git file (for submodules/worktrees) contains gitdir reference
/// Only reads the first 5 lines for efficiency
fn is_git_file(path: &Path) -> bool {
    match fs::File::open(path) {
        Ok(file) => {
            let reader = BufReader::new(file);
            reader
                .lines()
                .take(5)
                .map_while(Result::ok)
                .any(|line| line.trim_start().starts_with("gitdir:"))
        }
        Err(_) => false,
    }
}

/// Folder name used to label a repository in reports
pub fn repo_label(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

/// Recursively searches for git working copies below `search_path`
///
/// A directory qualifies when it holds a `.git` directory, or a `.git` file pointing
/// at one. Directories whose name is in `ignores` or in the built-in skip list are
/// neither reported nor descended into. Results are sorted by folder name
/// (case-insensitive), then by path.
pub fn find_repos_from_path(
    search_path: impl AsRef<Path>,
    ignores: &BTreeSet<String>,
) -> Vec<PathBuf> {
    let search_path = search_path.as_ref();

    let repos = Arc::new(DashSet::with_capacity(ESTIMATED_REPO_COUNT));
    let repos_clone = Arc::clone(&repos);
    let ignores = Arc::new(ignores.clone());

    let walker = WalkBuilder::new(search_path)
        .follow_links(true) // Follow symlinks to find symlinked repos
        .max_depth(Some(MAX_SCAN_DEPTH))
        .threads(num_cpus::get().min(8))
        .hidden(false) // Enable hidden files to see .git
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .ignore(false)
        .parents(false)
        .filter_entry(move |entry| {
            let file_name = entry.file_name().to_str().unwrap_or("");

            if file_name == ".git" {
                let path = entry.path();
                if let Some(repo_path) = path.parent() {
                    let is_git_repo = if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                        true
                    } else {
                        // Submodules and worktrees expose a .git file
                        is_git_file(path)
                    };
                    if is_git_repo {
                        repos_clone.insert(repo_path.to_path_buf());
                    }
                }
                // Don't descend into .git
                return false;
            }

            if entry.depth() > 0 {
                if SKIP_DIRECTORIES.contains(&file_name) || ignores.contains(file_name) {
                    debug!(path = %entry.path().display(), "skipping directory");
                    return false;
                }
                // Skip hidden files/directories, except .git (handled above)
                if file_name.starts_with('.') {
                    return false;
                }
            }

            true
        })
        .build_parallel();

    walker.run(|| Box::new(|_| ignore::WalkState::Continue));

    let mut found: Vec<PathBuf> = Arc::try_unwrap(repos)
        .map(|set| set.into_iter().collect())
        .unwrap_or_else(|arc| arc.iter().map(|p| p.key().clone()).collect());

    found.par_sort_by(|a, b| {
        repo_label(a)
            .to_lowercase()
            .cmp(&repo_label(b).to_lowercase())
            .then_with(|| a.cmp(b))
    });

    debug!(count = found.len(), root = %search_path.display(), "discovery finished");
    found
}

/// Prints the scanning banner and discovers repositories off the async runtime
pub async fn init_command(
    scanning_msg: &str,
    root: &Path,
    ignores: &BTreeSet<String>,
    show_banner: bool,
) -> (std::time::Instant, Vec<PathBuf>) {
    if show_banner {
        eprint!("{scanning_msg}");
        // Flush - ignore errors as this is non-critical
        let _ = std::io::stderr().flush();
    }

    let start_time = std::time::Instant::now();
    let root = root.to_path_buf();
    let ignores = ignores.clone();
    let repos = tokio::task::spawn_blocking(move || find_repos_from_path(&root, &ignores))
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error in repository discovery: {e}");
            Vec::new()
        });

    if show_banner {
        eprint!("\r\x1b[2K");
        let _ = std::io::stderr().flush();
    }

    (start_time, repos)
}
