//! Segmentation request
//!
//! A request names the source image and how its regions should be
//! exported. Every field except `input_path` has a default, and missing
//! JSON fields take the same defaults.

use crate::error::ExportResult;
use alphaseg_region::DEFAULT_ALPHA_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default first export index
pub const DEFAULT_START_INDEX: i32 = 1;

/// Default minimum width and height of an exported region
pub const DEFAULT_MIN_REGION_SIZE: i32 = 3;

/// Parameters for one segmentation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationRequest {
    /// Source image
    pub input_path: PathBuf,
    /// Output directory; defaults to the input file's directory
    pub output_directory: Option<PathBuf>,
    /// Output file stem; defaults to the input file stem
    pub output_base_name: Option<String>,
    /// Output extension including the dot; defaults to the input
    /// extension, or `.png` when the input has none
    pub output_extension: Option<String>,
    /// Pixels with opacity strictly above this are foreground
    pub alpha_threshold: u8,
    /// Index of the first exported region
    pub start_index: i32,
    /// Replace existing output files
    pub overwrite: bool,
    /// Regions narrower than this are dropped
    pub min_region_width: i32,
    /// Regions shorter than this are dropped
    pub min_region_height: i32,
}

impl Default for SegmentationRequest {
    fn default() -> Self {
        Self {
            input_path: PathBuf::new(),
            output_directory: None,
            output_base_name: None,
            output_extension: None,
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            start_index: DEFAULT_START_INDEX,
            overwrite: false,
            min_region_width: DEFAULT_MIN_REGION_SIZE,
            min_region_height: DEFAULT_MIN_REGION_SIZE,
        }
    }
}

impl SegmentationRequest {
    /// Create a request for `input_path` with default settings
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Self::default()
        }
    }

    /// Parse a request from JSON
    pub fn from_json(json: &str) -> ExportResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the output directory
    pub fn with_output_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_directory = Some(dir.into());
        self
    }

    /// Set the output file stem
    pub fn with_base_name(mut self, name: impl Into<String>) -> Self {
        self.output_base_name = Some(name.into());
        self
    }

    /// Set the output extension (including the dot)
    pub fn with_extension(mut self, ext: impl Into<String>) -> Self {
        self.output_extension = Some(ext.into());
        self
    }

    /// Set the opacity threshold
    pub fn with_alpha_threshold(mut self, threshold: u8) -> Self {
        self.alpha_threshold = threshold;
        self
    }

    /// Set the first export index
    pub fn with_start_index(mut self, index: i32) -> Self {
        self.start_index = index;
        self
    }

    /// Allow replacing existing output files
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set the minimum exported region size
    pub fn with_min_region_size(mut self, width: i32, height: i32) -> Self {
        self.min_region_width = width;
        self.min_region_height = height;
        self
    }
}
