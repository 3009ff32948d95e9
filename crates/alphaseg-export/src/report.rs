//! Run report and outward response

use alphaseg_core::Region;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One region that was written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportItem {
    pub index: i32,
    pub output_path: PathBuf,
    pub region: Region,
}

/// Result of a successful run.
///
/// `total_regions_detected` counts the regions that survived size
/// selection, including those skipped because their output already
/// existed, so it can exceed `items.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentationReport {
    pub input_path: PathBuf,
    pub output_directory: PathBuf,
    pub total_regions_detected: usize,
    pub items: Vec<ExportItem>,
}

impl SegmentationReport {
    /// Number of regions not written because their output existed
    pub fn skipped(&self) -> usize {
        self.total_regions_detected.saturating_sub(self.items.len())
    }

    /// Convert into the outward response
    pub fn into_response(self) -> SegmentationResponse {
        SegmentationResponse {
            input_path: self.input_path,
            output_directory: self.output_directory,
            total_regions_detected: i32::try_from(self.total_regions_detected).unwrap_or(i32::MAX),
            outputs: self
                .items
                .into_iter()
                .map(|item| ExportOutput {
                    index: item.index,
                    path: item.output_path,
                    region: item.region,
                })
                .collect(),
        }
    }
}

/// One written region in the outward response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOutput {
    pub index: i32,
    pub path: PathBuf,
    pub region: Region,
}

/// Outward response for a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentationResponse {
    pub input_path: PathBuf,
    pub output_directory: PathBuf,
    pub total_regions_detected: i32,
    pub outputs: Vec<ExportOutput>,
}
