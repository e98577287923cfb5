//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality including:
//! - Settings loading
//! - Repository discovery
//! - Progress reporting
//! - Statistics tracking
//!
//! Internal implementation details are not exposed through this API.

// Configuration
pub use super::config::{Config, ConfigError};
pub use super::config::{APP_NAME, NO_REPOS_MESSAGE, SCANNING_MESSAGE};

// Discovery
pub use super::discovery::{find_repos_from_path, init_command, repo_label};

// Progress and statistics
pub use super::progress::CheckProgress;
pub use super::stats::CheckStatistics;

// Terminal utilities (re-exported from utils)
pub use crate::utils::{set_terminal_title, set_terminal_title_and_flush};
