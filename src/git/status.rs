//! Branch sync status enumeration and utilities

use serde::{Serialize, Serializer};
use std::fmt;

pub const STATUS_OK: &str = "OK";
pub const STATUS_PUSH_REQUIRED: &str = "PUSH_REQUIRED";
pub const STATUS_MERGE_REQUIRED: &str = "MERGE_REQUIRED";

/// Sync status of a branch relative to its remote-tracking counterpart
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncStatus {
    /// Nothing to push; the branch may still be behind and need a pull
    Ok,
    /// Local commits exist that the remote does not have
    PushRequired,
    /// Both sides have commits the other lacks
    MergeRequired,
    /// Fetch failed; carries the classified failure text
    Failed(String),
}

impl SyncStatus {
    /// Derives the status from the ahead/behind counters
    pub fn derive(ahead_by: u32, behind_by: u32) -> Self {
        match (ahead_by > 0, behind_by > 0) {
            (true, true) => SyncStatus::MergeRequired,
            (true, false) => SyncStatus::PushRequired,
            (false, _) => SyncStatus::Ok,
        }
    }

    /// Returns the emoji symbol for this status
    pub fn symbol(&self) -> &str {
        match self {
            SyncStatus::Ok => "🟢",
            SyncStatus::PushRequired => "🟡",
            SyncStatus::MergeRequired => "🟠",
            SyncStatus::Failed(_) => "🔴",
        }
    }

    /// Returns the text representation of this status
    pub fn text(&self) -> &str {
        match self {
            SyncStatus::Ok => STATUS_OK,
            SyncStatus::PushRequired => STATUS_PUSH_REQUIRED,
            SyncStatus::MergeRequired => STATUS_MERGE_REQUIRED,
            SyncStatus::Failed(message) => message,
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl Serialize for SyncStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.text())
    }
}
