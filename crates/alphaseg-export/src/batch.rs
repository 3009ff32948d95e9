//! Batch execution
//!
//! Independent requests run concurrently on the rayon thread pool. Each
//! run owns its grid and visited mask; only the progress sink and the
//! cancel flag are shared.

use crate::error::ExportResult;
use crate::fs::{FileSystem, StdFileSystem};
use crate::pipeline::Exporter;
use crate::progress::ProgressSink;
use crate::report::SegmentationReport;
use crate::request::SegmentationRequest;
use alphaseg_core::CancelFlag;
use alphaseg_io::{FileCodec, ImageCodec};
use rayon::prelude::*;
use tracing::debug;

impl<F: FileSystem, C: ImageCodec> Exporter<F, C> {
    /// Run every request, results in request order.
    ///
    /// Events from all runs go to the same `progress` sink, interleaved.
    /// Setting `cancel` stops every run still in flight.
    pub fn run_batch(
        &self,
        requests: &[SegmentationRequest],
        progress: Option<&dyn ProgressSink>,
        cancel: Option<&CancelFlag>,
    ) -> Vec<ExportResult<SegmentationReport>> {
        debug!(requests = requests.len(), "starting batch");
        requests
            .par_iter()
            .map(|request| self.run(request, progress, cancel))
            .collect()
    }
}

/// Run a batch against the real filesystem with the default codec.
///
/// See [`Exporter::run_batch`].
pub fn run_batch(
    requests: &[SegmentationRequest],
    progress: Option<&dyn ProgressSink>,
    cancel: Option<&CancelFlag>,
) -> Vec<ExportResult<SegmentationReport>> {
    Exporter::<StdFileSystem, FileCodec>::default().run_batch(requests, progress, cancel)
}
