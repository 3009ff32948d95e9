//! Rectangle extraction

use super::RgbaImage;
use crate::error::{Error, Result};
use crate::region::Region;

impl RgbaImage {
    /// Extract a rectangular sub-region as a new image.
    ///
    /// The region is clipped to the image bounds, so a rectangle that
    /// hangs off the right or bottom edge yields a smaller image.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The region has zero width or height
    /// - The region origin is entirely outside the image bounds
    ///
    /// # Examples
    ///
    /// ```
    /// use alphaseg_core::{Region, RgbaImage};
    ///
    /// let img = RgbaImage::new(100, 80).unwrap();
    /// let clipped = img.clip_region(&Region::new_unchecked(80, 60, 50, 50)).unwrap();
    /// assert_eq!(clipped.width(), 20);
    /// assert_eq!(clipped.height(), 20);
    /// ```
    pub fn clip_region(&self, region: &Region) -> Result<RgbaImage> {
        if region.is_empty() {
            return Err(Error::InvalidParameter(format!(
                "clip region has zero dimension: {}x{}",
                region.width, region.height
            )));
        }

        let clipped = region.clip(self.width, self.height).ok_or_else(|| {
            Error::InvalidParameter(format!(
                "clip region origin ({}, {}) is outside image bounds ({}x{})",
                region.x, region.y, self.width, self.height
            ))
        })?;

        let mut out = RgbaImage::new(clipped.width, clipped.height)?;
        let src_w = self.width as usize;
        let dst_w = clipped.width as usize;
        for dy in 0..clipped.height as usize {
            let src_start = (clipped.y as usize + dy) * src_w + clipped.x as usize;
            let dst_start = dy * dst_w;
            out.data[dst_start..dst_start + dst_w]
                .copy_from_slice(&self.data[src_start..src_start + dst_w]);
        }

        Ok(out)
    }
}
