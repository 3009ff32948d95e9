//! Export pipeline regression test
//!
//! Runs the full pipeline against real PNG and BMP files in a scratch
//! directory.
//!
//! Run with:
//! ```
//! cargo test -p alphaseg-export --test pipeline_reg
//! ```

use alphaseg_core::{CancelFlag, Region, RgbaImage};
use alphaseg_export::{
    ErrorKind, ExportError, ProgressLog, ProgressScope, SegmentationRequest, ValidationError, run,
};
use alphaseg_io::{ImageFormat, read_image, write_image};
use alphaseg_test::{RegParams, init_logging, sprite_sheet};
use std::path::{Path, PathBuf};

fn write_fixture(dir: &Path, name: &str, img: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    write_image(img, &path, ImageFormat::from_path(&path)).unwrap();
    path
}

#[test]
fn pipeline_reg() {
    init_logging();
    let mut rp = RegParams::new("pipeline");
    let dir = tempfile::tempdir().unwrap();

    // -----------------------------------------------------------
    // 10x10 with two 2x2 squares, min size 1 -> two files
    // -----------------------------------------------------------
    let corners = sprite_sheet(10, 10, &[(0, 0, 2, 2), (8, 8, 2, 2)]).unwrap();
    let input = write_fixture(dir.path(), "corners.png", &corners);
    let request = SegmentationRequest::new(&input).with_min_region_size(1, 1);
    let report = run(&request, None, None).unwrap();

    rp.compare_values(2.0, report.total_regions_detected as f64, 0.0); // 1
    rp.compare_values(2.0, report.items.len() as f64, 0.0); // 2
    rp.compare_values(1.0, report.items[0].index as f64, 0.0); // 3
    rp.compare_values(2.0, report.items[1].index as f64, 0.0); // 4
    let regions: Vec<Region> = report.items.iter().map(|i| i.region).collect();
    rp.compare_regions(
        &[
            Region::new_unchecked(0, 0, 2, 2),
            Region::new_unchecked(8, 8, 2, 2),
        ],
        &regions,
    ); // 5
    assert_eq!(report.items[0].output_path, dir.path().join("corners_1.png"));
    assert!(report.items[1].output_path.is_file());

    // Written crops decode back to exactly the source pixels
    let crop = read_image(&report.items[1].output_path).unwrap();
    let expected = corners.clip_region(&regions[1]).unwrap();
    rp.compare_images(&expected, &crop); // 6

    // -----------------------------------------------------------
    // Same image, min width 3 -> success with nothing written
    // -----------------------------------------------------------
    let out = dir.path().join("empty");
    let request = SegmentationRequest::new(&input)
        .with_output_directory(&out)
        .with_min_region_size(3, 1);
    let report = run(&request, None, None).unwrap();
    rp.compare_values(0.0, report.total_regions_detected as f64, 0.0); // 7
    rp.compare_values(0.0, report.items.len() as f64, 0.0); // 8
    assert!(out.is_dir());
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);

    // -----------------------------------------------------------
    // 4x4 fully opaque -> one region covering the image
    // -----------------------------------------------------------
    let full = sprite_sheet(4, 4, &[(0, 0, 4, 4)]).unwrap();
    let input = write_fixture(dir.path(), "full.png", &full);
    let report = run(&SegmentationRequest::new(&input), None, None).unwrap();
    rp.compare_regions(&[Region::new_unchecked(0, 0, 4, 4)], &[report.items[0].region]); // 9

    assert!(rp.cleanup(), "pipeline regression test failed");
}

#[test]
fn pipeline_start_index_and_naming() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let sheet = sprite_sheet(30, 8, &[(0, 0, 5, 5), (10, 2, 5, 5), (20, 0, 5, 8)]).unwrap();
    let input = write_fixture(dir.path(), "sheet.png", &sheet);

    let out = dir.path().join("nested").join("out");
    let request = SegmentationRequest::new(&input)
        .with_output_directory(&out)
        .with_base_name("hero")
        .with_extension(".bmp")
        .with_start_index(5);
    let report = run(&request, None, None).unwrap();

    let indices: Vec<i32> = report.items.iter().map(|i| i.index).collect();
    assert_eq!(indices, vec![5, 6, 7]);
    for index in 5..=7 {
        let path = out.join(format!("hero_{index}.bmp"));
        assert!(path.is_file(), "missing {}", path.display());
    }
    // The tall sprite starts on row 0, so it is found second
    let crop = read_image(out.join("hero_6.bmp")).unwrap();
    assert_eq!((crop.width(), crop.height()), (5, 8));

    let response = report.into_response();
    assert_eq!(response.total_regions_detected, 3);
    assert_eq!(response.output_directory, out);
}

#[test]
fn pipeline_overwrite_asymmetry() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let sheet = sprite_sheet(20, 5, &[(0, 0, 4, 4), (10, 0, 4, 4)]).unwrap();
    let input = write_fixture(dir.path(), "sheet.png", &sheet);

    let existing = dir.path().join("sheet_1.png");
    std::fs::write(&existing, b"keep me").unwrap();

    let request = SegmentationRequest::new(&input);
    let report = run(&request, None, None).unwrap();
    assert_eq!(report.total_regions_detected, 2);
    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].index, 2);
    assert_eq!(std::fs::read(&existing).unwrap(), b"keep me");

    let report = run(&request.with_overwrite(true), None, None).unwrap();
    assert_eq!(report.items.len(), 2);
    let replaced = read_image(&existing).unwrap();
    assert_eq!((replaced.width(), replaced.height()), (4, 4));
}

#[test]
fn pipeline_validation_errors() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never-created");
    let request = SegmentationRequest::new(dir.path().join("nope.png"))
        .with_output_directory(&out)
        .with_start_index(0)
        .with_min_region_size(0, 1)
        .with_extension("png");

    let err = run(&request, None, None).unwrap_err();
    let ExportError::Validation(problems) = &err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(problems.len(), 4);
    assert!(matches!(problems[0], ValidationError::InputNotFound(_)));
    assert!(!out.exists());

    let details = err.details();
    assert_eq!(details.len(), 4);
    assert!(details.iter().all(|d| d.kind == ErrorKind::Validation));
}

#[test]
fn pipeline_cancellation() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let sheet = sprite_sheet(40, 5, &[(0, 0, 4, 4), (10, 0, 4, 4), (20, 0, 4, 4)]).unwrap();
    let input = write_fixture(dir.path(), "sheet.png", &sheet);

    let flag = CancelFlag::new();
    let trigger = flag.clone();
    let sink = move |e: &alphaseg_export::ProgressEvent| {
        if e.scope == ProgressScope::Save {
            trigger.cancel();
        }
    };
    let err = run(&SegmentationRequest::new(&input), Some(&sink), Some(&flag)).unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(err.details()[0].kind, ErrorKind::Cancelled);

    // The region written before cancellation stays on disk
    assert!(dir.path().join("sheet_1.png").is_file());
    assert!(!dir.path().join("sheet_2.png").exists());
}

#[test]
fn pipeline_progress_and_decode_failure() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();

    let bogus = dir.path().join("bogus.png");
    std::fs::write(&bogus, b"definitely not a png").unwrap();
    let log = ProgressLog::new();
    let err = run(&SegmentationRequest::new(&bogus), Some(&log), None).unwrap_err();
    assert!(matches!(err, ExportError::Decode { .. }));
    assert_eq!(err.kind(), ErrorKind::Decode);
    // Loading was announced, nothing after it
    assert_eq!(log.len(), 1);
    assert_eq!(log.events()[0].scope, ProgressScope::Load);
}
