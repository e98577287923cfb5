//! Branch comparator

use super::types::BranchComparison;
use crate::git::HeadBranch;

/// Compares an already fetched head branch with its upstream; missing counters count as zero
pub fn compare_branch(directory: &str, head: &HeadBranch) -> BranchComparison {
    BranchComparison::new(
        directory,
        head.name.as_str(),
        head.ahead_by.unwrap_or(0),
        head.behind_by.unwrap_or(0),
    )
}
