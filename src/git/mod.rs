// Internal modules - not part of public API
pub(crate) mod cli;
pub(crate) mod handle;
pub(crate) mod operations;
pub(crate) mod status;

// Public API - curated exports only
pub mod api;

// Re-export key items at module level for convenience
pub use api::*;
