//! alphaseg-export - Per-region export pipeline
//!
//! Turns a sprite sheet (or any image with disjoint opaque shapes on a
//! transparent background) into one cropped image file per shape.
//!
//! - [`SegmentationRequest`] - what to read and how to name the outputs
//! - [`validate`] - request checks run before any I/O
//! - [`Exporter`] / [`run`] - the pipeline itself
//! - [`SegmentationReport`] / [`SegmentationResponse`] - what was written
//! - [`run_batch`] - several independent requests in parallel
//!
//! # Examples
//!
//! ```no_run
//! use alphaseg_export::{ProgressEvent, SegmentationRequest, run};
//!
//! let request = SegmentationRequest::new("sprites/sheet.png")
//!     .with_output_directory("sprites/out")
//!     .with_min_region_size(4, 4);
//!
//! let print = |e: &ProgressEvent| println!("{:>3}% {}", e.percent, e.message);
//! let report = run(&request, Some(&print), None)?;
//! for item in &report.items {
//!     println!("{} -> {}", item.region, item.output_path.display());
//! }
//! # Ok::<(), alphaseg_export::ExportError>(())
//! ```

pub mod batch;
pub mod error;
pub mod fs;
pub mod naming;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod request;
pub mod validate;

pub use alphaseg_core::CancelFlag;
pub use batch::run_batch;
pub use error::{ErrorDetail, ErrorKind, ExportError, ExportResult, ValidationError};
pub use fs::{FileSystem, StdFileSystem};
pub use naming::OutputNaming;
pub use pipeline::{Exporter, run};
pub use progress::{ProgressEvent, ProgressLog, ProgressScope, ProgressSink};
pub use report::{ExportItem, ExportOutput, SegmentationReport, SegmentationResponse};
pub use request::SegmentationRequest;
pub use validate::validate;
