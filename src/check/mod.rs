//! The validation-and-comparison pipeline run for every discovered directory.

pub mod compare;
pub mod fetch;
pub mod pipeline;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod fake;

pub use compare::compare_branch;
pub use fetch::{fetch_origin, FetchFailure};
pub use pipeline::{check_directory, run_checks, FetchAndCompare, ProgressFn};
pub use types::{BranchComparison, CheckOutcome, PipelineError, NOT_A_REPOSITORY};
pub use validation::{validate, ValidationFailure, ORIGIN};
