//! Segmentation and export pipeline
//!
//! One run validates the request, decodes the source, detects and
//! selects regions, then crops and writes each surviving region to its
//! own file. Runs share no mutable state, so independent runs may
//! execute concurrently (see [`crate::batch`]).

use crate::error::{ExportError, ExportResult, ValidationError};
use crate::fs::{FileSystem, StdFileSystem};
use crate::naming::OutputNaming;
use crate::progress::{ProgressEvent, ProgressScope, ProgressSink, emit, save_percent};
use crate::report::{ExportItem, SegmentationReport};
use crate::request::SegmentationRequest;
use crate::validate::validate;
use alphaseg_core::CancelFlag;
use alphaseg_core::cancel::is_cancelled;
use alphaseg_io::{FileCodec, ImageCodec};
use alphaseg_region::{detect_regions, select_by_size};
use tracing::{debug, info, warn};

/// Pipeline bound to a filesystem and an image codec.
#[derive(Debug, Clone, Default)]
pub struct Exporter<F = StdFileSystem, C = FileCodec> {
    fs: F,
    codec: C,
}

impl<F: FileSystem, C: ImageCodec> Exporter<F, C> {
    /// Create an exporter from its collaborators
    pub fn new(fs: F, codec: C) -> Self {
        Self { fs, codec }
    }

    /// Filesystem collaborator
    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Codec collaborator
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Run one segmentation.
    ///
    /// # Errors
    ///
    /// - [`ExportError::Validation`] if the request is invalid; nothing
    ///   is read or written in that case
    /// - [`ExportError::CreateDir`] if the output directory cannot be
    ///   created
    /// - [`ExportError::Decode`] / [`ExportError::Encode`] on codec failure
    /// - [`ExportError::Cancelled`] once `cancel` is observed; files
    ///   written before that point are left in place
    pub fn run(
        &self,
        request: &SegmentationRequest,
        progress: Option<&dyn ProgressSink>,
        cancel: Option<&CancelFlag>,
    ) -> ExportResult<SegmentationReport> {
        let errors = validate(request, &self.fs);
        if !errors.is_empty() {
            warn!(
                input = %request.input_path.display(),
                problems = errors.len(),
                "request rejected"
            );
            return Err(ExportError::Validation(errors));
        }

        let naming = OutputNaming::resolve(request);
        if !self.fs.exists(&naming.directory) {
            debug!(dir = %naming.directory.display(), "creating output directory");
            self.fs
                .create_dir_all(&naming.directory)
                .map_err(|source| ExportError::CreateDir {
                    path: naming.directory.clone(),
                    source,
                })?;
        }

        emit(
            progress,
            ProgressEvent::new("Loading image", 5, ProgressScope::Load),
        );
        let image = self
            .codec
            .decode(&request.input_path)
            .map_err(|source| ExportError::Decode {
                path: request.input_path.clone(),
                source,
            })?;

        emit(
            progress,
            ProgressEvent::new("Detecting regions", 20, ProgressScope::Scan),
        );
        let detected = detect_regions(&image, request.alpha_threshold, cancel)?;
        // Validation guarantees both minimums are >= 1
        let regions = select_by_size(
            &detected,
            request.min_region_width as u32,
            request.min_region_height as u32,
        );
        debug!(
            detected = detected.len(),
            selected = regions.len(),
            "regions selected"
        );

        let total = regions.len();
        if !indices_fit(request.start_index, total) {
            warn!(
                start_index = request.start_index,
                regions = total,
                "export indices would overflow"
            );
            return Err(ExportError::Validation(vec![
                ValidationError::IndexOverflow {
                    start_index: request.start_index,
                    regions: total,
                },
            ]));
        }
        let mut items = Vec::with_capacity(total);

        for (position, region) in regions.iter().enumerate() {
            if is_cancelled(cancel) {
                info!(written = items.len(), total, "export cancelled");
                return Err(ExportError::Cancelled);
            }

            // In range: indices_fit checked start_index + (total - 1)
            let index = request.start_index + position as i32;
            let path = naming.path_for(index);

            if !request.overwrite && self.fs.exists(&path) {
                warn!(path = %path.display(), index, "output exists, skipping region");
            } else {
                let crop = image
                    .clip_region(region)
                    .map_err(|source| ExportError::Crop {
                        region: *region,
                        source,
                    })?;
                self.codec
                    .encode(&crop, &path)
                    .map_err(|source| ExportError::Encode {
                        path: path.clone(),
                        source,
                    })?;
                debug!(path = %path.display(), index, %region, "region written");
                items.push(ExportItem {
                    index,
                    output_path: path,
                    region: *region,
                });
            }

            emit(
                progress,
                ProgressEvent::new(
                    format!("Saving region {}", index),
                    save_percent(position + 1, total),
                    ProgressScope::Save,
                ),
            );
        }

        emit(progress, ProgressEvent::new("Done", 100, ProgressScope::Done));

        let report = SegmentationReport {
            input_path: request.input_path.clone(),
            output_directory: naming.directory,
            total_regions_detected: total,
            items,
        };
        info!(
            input = %report.input_path.display(),
            regions = report.total_regions_detected,
            written = report.items.len(),
            skipped = report.skipped(),
            "segmentation finished"
        );
        Ok(report)
    }
}

/// Whether `count` consecutive indices starting at `start` fit in `i32`.
fn indices_fit(start: i32, count: usize) -> bool {
    match count.checked_sub(1) {
        None => true,
        Some(last) => i32::try_from(last)
            .ok()
            .and_then(|last| start.checked_add(last))
            .is_some(),
    }
}

/// Run one segmentation against the real filesystem with the default
/// codec.
///
/// See [`Exporter::run`].
pub fn run(
    request: &SegmentationRequest,
    progress: Option<&dyn ProgressSink>,
    cancel: Option<&CancelFlag>,
) -> ExportResult<SegmentationReport> {
    Exporter::<StdFileSystem, FileCodec>::default().run(request, progress, cancel)
}
