//! Error types for ip-scatter.

use thiserror::Error;

/// Errors that stop a benchmark run.
///
/// Addresses a candidate cannot derive a number from are not errors; they are
/// counted under the `NaN` bucket.
#[derive(Error, Debug)]
pub enum ScatterError {
    /// Bucket count of zero
    #[error("Invalid bucket count: {0} (must be at least 1)")]
    InvalidBucketCount(u64),

    /// Empty input where non-empty was required
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Failure writing the report
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ip-scatter operations.
pub type Result<T> = std::result::Result<T, ScatterError>;
