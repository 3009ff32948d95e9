//! alphaseg - Split alpha-channel images into one file per opaque region
//!
//! # Overview
//!
//! Given an image with disjoint non-transparent shapes on a transparent
//! background (a sprite sheet, a scanned composite), alphaseg:
//!
//! - finds every 8-connected set of pixels whose opacity exceeds a
//!   threshold and reports its bounding rectangle
//! - drops regions smaller than a minimum size
//! - crops each surviving rectangle and writes it to its own file
//!
//! # Example
//!
//! ```
//! use alphaseg::{Region, RgbaImage};
//! use alphaseg::region::detect_regions;
//!
//! let mut sheet = RgbaImage::new(16, 8).unwrap();
//! sheet.fill_rect(1, 1, 4, 4, 0xffffffff);
//! sheet.fill_rect(9, 2, 6, 5, 0xffffffff);
//!
//! let regions = detect_regions(&sheet, 10, None).unwrap();
//! assert_eq!(regions, vec![
//!     Region::new_unchecked(1, 1, 4, 4),
//!     Region::new_unchecked(9, 2, 6, 5),
//! ]);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use alphaseg_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use alphaseg_export as export;
pub use alphaseg_io as io;
pub use alphaseg_region as region;

pub use alphaseg_export::{SegmentationReport, SegmentationRequest, run, run_batch};
