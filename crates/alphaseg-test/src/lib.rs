//! alphaseg-test - Regression test framework for alphaseg
//!
//! This crate provides a small regression test harness and fixture
//! builders shared by the other crates' `tests/*_reg.rs` files.
//!
//! # Usage
//!
//! ```ignore
//! use alphaseg_test::{RegParams, sprite_sheet};
//!
//! let mut rp = RegParams::new("detect");
//! rp.compare_values(2.0, regions.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: "compare" (default) or "display"; display mode also
//!   writes intermediate images under `tests/regout`
//! - `RUST_LOG`: log filter used by [`init_logging`]

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use alphaseg_core::{RgbaImage, color};

/// Opaque colour used for fixture sprites
pub const SPRITE_PIXEL: u32 = 0xCC3366FF;

/// Install a `tracing` subscriber for tests.
///
/// Honors `RUST_LOG`; output goes through the test harness so it is only
/// shown for failing tests. Safe to call from every test.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // alphaseg-test is at crates/alphaseg-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Build a transparent image with opaque rectangles `(x, y, w, h)`.
pub fn sprite_sheet(width: u32, height: u32, rects: &[(u32, u32, u32, u32)]) -> TestResult<RgbaImage> {
    let mut img = RgbaImage::new(width, height)?;
    for &(x, y, w, h) in rects {
        img.fill_rect(x, y, w, h, SPRITE_PIXEL);
    }
    Ok(img)
}

/// Build an image from an ASCII picture.
///
/// `#` is fully opaque, `+` is half transparent (alpha 128), `-` is
/// faint (alpha 5), anything else is fully transparent.
pub fn image_from_ascii(rows: &[&str]) -> TestResult<RgbaImage> {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;
    let mut img = RgbaImage::new(width, height)?;
    for (y, row) in rows.iter().enumerate() {
        for (x, c) in row.bytes().enumerate().take(width as usize) {
            let a = match c {
                b'#' => 255,
                b'+' => 128,
                b'-' => 5,
                _ => 0,
            };
            if a > 0 {
                img.set_pixel_unchecked(x as u32, y as u32, color::compose_rgba(200, 100, 50, a));
            }
        }
    }
    Ok(img)
}
