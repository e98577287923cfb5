//! # git-drift
//!
//! `git-drift` reports, for every git working copy under a directory, whether the
//! checked-out branch is ahead of, behind, or diverged from its `origin`
//! counterpart. It powers the `git-drift` CLI tool.
//!
//! ## Core Features
//!
//! - **Fast Discovery**: Parallel repository scanning using `ignore` and `rayon`.
//! - **Safety Checks**: A repository is only fetched when it has an approved `origin`,
//!   tracks it, and has a clean working tree.
//! - **Read-only**: Fetches update remote-tracking refs; nothing is merged or pushed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use git_drift::check::run_checks;
//! use git_drift::core::{find_repos_from_path, Config};
//! use git_drift::git::GitCli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(None)?;
//!     let repos = find_repos_from_path(".", &config.ignores);
//!     for outcome in run_checks(&GitCli, &config, &repos, &|_| {}).await {
//!         match outcome {
//!             Ok(c) => println!("{} {} {}", c.directory, c.branch_name, c.status),
//!             Err(e) => println!("{e}"),
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod check;
pub mod commands;
pub mod core;
pub mod git;
pub mod utils;
