//! Configuration constants and the per-run settings file

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::git::Credentials;

// Timeout constants
pub const GIT_OPERATION_TIMEOUT_SECS: u64 = 180; // 3 minutes per git command

// Progress display configuration
pub const PROGRESS_TEMPLATE: &str = "{spinner} {wide_msg}";
pub const PROGRESS_TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ";
pub const PROGRESS_TICK_MILLIS: u64 = 120;

// UI Constants
pub const APP_NAME: &str = "git-drift";
pub const SCANNING_MESSAGE: &str = "🔍 Scanning for git repositories...";
pub const NO_REPOS_MESSAGE: &str = "No git repositories found in current directory.";
pub const CHECKING_MESSAGE: &str = "checking";

// Display formatting constants
pub const PATH_DISPLAY_WIDTH: usize = 40;

// Directories to skip during repository search
pub const SKIP_DIRECTORIES: &[&str] = &[
    "node_modules",
    "vendor",
    "target",
    "build",
    ".next",
    "dist",
    "__pycache__",
    ".venv",
    "venv",
];

// Repository discovery configuration
pub const MAX_SCAN_DEPTH: usize = 10; // Maximum directory depth to scan
pub const ESTIMATED_REPO_COUNT: usize = 50; // Pre-allocation hint for collections

// Settings file location and environment overrides
const CONFIG_DIR_NAME: &str = "git-drift";
const CONFIG_FILE_NAME: &str = "config.toml";
const USERNAME_ENV: &str = "GIT_DRIFT_USERNAME";
const PASSWORD_ENV: &str = "GIT_DRIFT_PASSWORD";
const REMOTE_MUST_MATCH_ENV: &str = "GIT_DRIFT_REMOTE_MUST_MATCH";

/// Errors that stop a run before any repository is checked
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine the user config directory; pass --config")]
    NoConfigDir,
}

/// Settings loaded once per run and read-only afterwards
///
/// ```toml
/// git_username = "deploy-bot"
/// git_password = "token"
/// remote_must_match = "github.com/acme/"
/// ignores = ["scratch", "archive"]
/// ```
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub git_username: String,
    pub git_password: String,
    /// Substring the `origin` URL has to contain before we fetch from it
    pub remote_must_match: String,
    /// Directory names skipped during discovery
    #[serde(default)]
    pub ignores: BTreeSet<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("git_username", &self.git_username)
            .field("git_password", &"<redacted>")
            .field("remote_must_match", &self.remote_must_match)
            .field("ignores", &self.ignores)
            .finish()
    }
}

impl Config {
    /// Parses settings from TOML text; `path` is only used for error reporting
    pub fn from_toml(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::from_toml(&contents, path)
    }

    /// Returns `~/.config/git-drift/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads settings from `explicit` or the default location, then applies
    /// environment overrides
    ///
    /// Supported variables:
    /// - GIT_DRIFT_USERNAME
    /// - GIT_DRIFT_PASSWORD
    /// - GIT_DRIFT_REMOTE_MUST_MATCH
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => Self::default_config_path().ok_or(ConfigError::NoConfigDir)?,
        };
        Ok(Self::load_from_file(&path)?.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Applies overrides looked up through `lookup` (the environment in production)
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(username) = lookup(USERNAME_ENV) {
            self.git_username = username;
        }
        if let Some(password) = lookup(PASSWORD_ENV) {
            self.git_password = password;
        }
        if let Some(pattern) = lookup(REMOTE_MUST_MATCH_ENV) {
            self.remote_must_match = pattern;
        }
        self
    }

    /// Credentials for authenticated fetches
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.git_username, &self.git_password)
    }
}
