//! Error types for alphaseg-region

use thiserror::Error;

/// Errors that can occur during region detection
#[derive(Debug, Error)]
pub enum RegionError {
    /// The caller's cancel flag was observed mid-scan
    #[error("region detection cancelled")]
    Cancelled,
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
