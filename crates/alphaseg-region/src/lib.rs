//! alphaseg-region - Region detection over alpha channels
//!
//! This crate provides:
//!
//! - **Region detection** - Connected-component labelling of foreground
//!   (above-threshold) pixels, reported as bounding rectangles
//! - **Size selection** - Dropping regions below a minimum size
//!
//! # Examples
//!
//! ```
//! use alphaseg_core::{Region, RgbaImage};
//! use alphaseg_region::{detect_regions, select_by_size};
//!
//! // Two opaque 2x2 squares in opposite corners of a 10x10 sheet
//! let mut sheet = RgbaImage::new(10, 10).unwrap();
//! sheet.fill_rect(0, 0, 2, 2, 0xffffffff);
//! sheet.fill_rect(8, 8, 2, 2, 0xffffffff);
//!
//! let regions = detect_regions(&sheet, 10, None).unwrap();
//! assert_eq!(regions, vec![
//!     Region::new_unchecked(0, 0, 2, 2),
//!     Region::new_unchecked(8, 8, 2, 2),
//! ]);
//!
//! assert!(select_by_size(&regions, 3, 3).is_empty());
//! ```

pub mod detect;
pub mod error;
pub mod select;

// Re-export core types
pub use alphaseg_core;

pub use detect::{
    ConnectivityType, DEFAULT_ALPHA_THRESHOLD, DetectOptions, VisitedMask, detect_regions,
    detect_regions_with,
};
pub use error::{RegionError, RegionResult};
pub use select::select_by_size;
