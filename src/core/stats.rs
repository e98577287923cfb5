//! Statistics tracking for check runs

use std::time::Duration;

use crate::check::CheckOutcome;
use crate::git::SyncStatus;

/// Counters for one run, one increment per checked directory
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckStatistics {
    pub up_to_date: u64,
    pub push_required: u64,
    pub merge_required: u64,
    /// Repositories with OK status that are behind their remote
    pub pull_available: u64,
    pub failed: u64,
}

impl CheckStatistics {
    /// Creates a new statistics tracker with all counters initialized to zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds statistics from a finished run
    pub fn from_outcomes(outcomes: &[CheckOutcome]) -> Self {
        let mut stats = Self::new();
        for outcome in outcomes {
            stats.update(outcome);
        }
        stats
    }

    /// Updates statistics based on one directory's outcome
    pub fn update(&mut self, outcome: &CheckOutcome) {
        match outcome {
            Ok(comparison) => match comparison.status {
                SyncStatus::Ok => {
                    self.up_to_date += 1;
                    if comparison.behind_by > 0 {
                        self.pull_available += 1;
                    }
                }
                SyncStatus::PushRequired => self.push_required += 1,
                SyncStatus::MergeRequired => self.merge_required += 1,
                SyncStatus::Failed(_) => self.failed += 1,
            },
            Err(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.up_to_date + self.push_required + self.merge_required + self.failed
    }

    /// True when every row has OK status
    pub fn all_ok(&self) -> bool {
        self.push_required == 0 && self.merge_required == 0 && self.failed == 0
    }

    /// Generates the one-line summary shown after the report
    pub fn generate_summary(&self, duration: Duration) -> String {
        let duration_secs = duration.as_secs_f64();
        let mut summary = format!(
            "✅ Completed in {:.1}s • {} ok • {} to pull • {} to push • {} to merge",
            duration_secs,
            self.up_to_date,
            self.pull_available,
            self.push_required,
            self.merge_required
        );
        if self.failed > 0 {
            summary.push_str(&format!(" • {} failed", self.failed));
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{BranchComparison, PipelineError};

    fn comparison(ahead: u32, behind: u32) -> BranchComparison {
        BranchComparison::new("repo", "main", ahead, behind)
    }

    #[test]
    fn test_counts_each_outcome_once() {
        let outcomes: Vec<CheckOutcome> = vec![
            Ok(comparison(0, 0)),
            Ok(comparison(0, 2)),
            Ok(comparison(3, 0)),
            Ok(comparison(1, 1)),
            Err(PipelineError::new("x", Some("main".into()), "UNCOMMITTED")),
            Err(PipelineError::fetch_failed("y", "main", "Incorrect credentials")),
        ];
        let stats = CheckStatistics::from_outcomes(&outcomes);
        assert_eq!(stats.up_to_date, 2);
        assert_eq!(stats.pull_available, 1);
        assert_eq!(stats.push_required, 1);
        assert_eq!(stats.merge_required, 1);
        assert_eq!(stats.failed, 2);
        assert_eq!(stats.total(), outcomes.len() as u64);
        assert!(!stats.all_ok());
    }

    #[test]
    fn test_all_ok_ignores_pending_pulls() {
        let stats = CheckStatistics::from_outcomes(&[Ok(comparison(0, 0)), Ok(comparison(0, 7))]);
        assert!(stats.all_ok());
    }

    #[test]
    fn test_summary_mentions_failures_only_when_present() {
        let clean = CheckStatistics::from_outcomes(&[Ok(comparison(0, 0))]);
        let summary = clean.generate_summary(Duration::from_millis(1500));
        assert!(summary.starts_with("✅ Completed in 1.5s"));
        assert!(!summary.contains("failed"));

        let failing = CheckStatistics::from_outcomes(&[Err(PipelineError::not_a_repository("/a"))]);
        assert!(failing.generate_summary(Duration::ZERO).ends_with("• 1 failed"));
    }
}
