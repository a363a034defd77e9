// Public modules
pub mod config;
pub mod error;
pub mod rewrite;
pub mod walker;

// Internal modules - not part of public API
pub(crate) mod local_files;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use rewrite::{
    FileFix, FileOutcome, FileStatus, FixOptions, FixReport, FixSummary, Rewrite,
};
