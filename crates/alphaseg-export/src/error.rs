//! Export error types
//!
//! Every failure the pipeline can report is an [`ExportError`]. Codec,
//! filesystem and cancellation errors are converted at the pipeline
//! boundary so callers never see a raw lower-layer error.

use alphaseg_core::Region;
use alphaseg_io::IoError;
use alphaseg_region::RegionError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// A single problem found while validating a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The input path is empty
    #[error("input path is empty")]
    MissingInputPath,

    /// The input path does not exist
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The input path exists but is not a regular file
    #[error("input path is not a file: {}", .0.display())]
    InputNotFile(PathBuf),

    /// Start index below 1
    #[error("start index must be at least 1, got {0}")]
    InvalidStartIndex(i32),

    /// Minimum region width below 1
    #[error("minimum region width must be at least 1, got {0}")]
    InvalidMinWidth(i32),

    /// Minimum region height below 1
    #[error("minimum region height must be at least 1, got {0}")]
    InvalidMinHeight(i32),

    /// Explicit extension without a leading dot, with nothing after it,
    /// or containing a path separator
    #[error("output extension must look like \".png\", got {0:?}")]
    InvalidExtension(String),

    /// Explicit base name that is empty or contains a path separator
    #[error("output base name must be a plain file name, got {0:?}")]
    InvalidBaseName(String),

    /// Numbering the surviving regions from the start index would pass
    /// `i32::MAX`
    #[error("{regions} region(s) starting at index {start_index} overflow the index range")]
    IndexOverflow { start_index: i32, regions: usize },
}

/// Error type for the export pipeline.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The request failed validation; nothing was touched on disk
    #[error("invalid request ({} problem(s))", .0.len())]
    Validation(Vec<ValidationError>),

    /// The request could not be parsed
    #[error("malformed request: {0}")]
    Request(#[from] serde_json::Error),

    /// The source image could not be decoded
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    /// A region could not be encoded or written
    #[error("failed to write {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    /// The output directory could not be created
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A detected region could not be cropped from the source
    #[error("failed to crop region {region}: {source}")]
    Crop {
        region: Region,
        #[source]
        source: alphaseg_core::Error,
    },

    /// The run was cancelled
    #[error("operation cancelled")]
    Cancelled,
}

impl From<RegionError> for ExportError {
    fn from(err: RegionError) -> Self {
        match err {
            RegionError::Cancelled => ExportError::Cancelled,
        }
    }
}

/// Convenience alias for export results.
pub type ExportResult<T> = Result<T, ExportError>;

/// Coarse error category for outward responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Validation,
    Request,
    Decode,
    Encode,
    Filesystem,
    Cancelled,
}

/// One flattened error entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorDetail {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl ExportError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExportError::Validation(_) => ErrorKind::Validation,
            ExportError::Request(_) => ErrorKind::Request,
            ExportError::Decode { .. } => ErrorKind::Decode,
            ExportError::Encode { .. } | ExportError::Crop { .. } => ErrorKind::Encode,
            ExportError::CreateDir { .. } => ErrorKind::Filesystem,
            ExportError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Whether this error is a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExportError::Cancelled)
    }

    /// Flatten into outward error details.
    ///
    /// A validation failure yields one entry per problem; every other
    /// error yields a single entry.
    pub fn details(&self) -> Vec<ErrorDetail> {
        match self {
            ExportError::Validation(errors) => errors
                .iter()
                .map(|e| ErrorDetail::new(ErrorKind::Validation, e.to_string()))
                .collect(),
            other => vec![ErrorDetail::new(other.kind(), other.to_string())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_cancel_maps_to_cancelled() {
        let err: ExportError = RegionError::Cancelled.into();
        assert!(err.is_cancelled());
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn test_validation_details_one_per_problem() {
        let err = ExportError::Validation(vec![
            ValidationError::InvalidStartIndex(0),
            ValidationError::InvalidMinWidth(-1),
        ]);
        let details = err.details();
        assert_eq!(details.len(), 2);
        assert!(details.iter().all(|d| d.kind == ErrorKind::Validation));
        assert!(details[0].message.contains("start index"));
    }

    #[test]
    fn test_detail_serialization() {
        let detail = ExportError::Cancelled.details().remove(0);
        let json = serde_json::to_string(&detail).unwrap();
        assert_eq!(json, r#"{"kind":"cancelled","message":"operation cancelled"}"#);
    }
}
