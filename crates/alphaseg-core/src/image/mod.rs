//! RgbaImage - the main image container
//!
//! [`RgbaImage`] is an owned 8-bit-per-channel RGBA raster. Pixels are
//! stored one per `u32` word in `0xRRGGBBAA` order (see [`crate::color`]).
//!
//! The region detector does not depend on this concrete type: it reads
//! opacity through the [`AlphaView`] trait, which [`RgbaImage`] and the
//! lightweight [`AlphaPlane`] both implement.

mod access;
mod clip;

use crate::error::{Error, Result};

/// Read-only view of a pixel grid's opacity channel.
///
/// Implementors guarantee that `alpha(x, y)` is valid for every
/// `x < width()` and `y < height()`. Callers must not ask for
/// coordinates outside that range.
pub trait AlphaView {
    /// Grid width in pixels
    fn width(&self) -> u32;

    /// Grid height in pixels
    fn height(&self) -> u32;

    /// Opacity at (x, y), 0 = fully transparent, 255 = fully opaque
    fn alpha(&self, x: u32, y: u32) -> u8;

    /// Total number of pixels
    #[inline]
    fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}

impl<T: AlphaView + ?Sized> AlphaView for &T {
    #[inline]
    fn width(&self) -> u32 {
        (**self).width()
    }

    #[inline]
    fn height(&self) -> u32 {
        (**self).height()
    }

    #[inline]
    fn alpha(&self, x: u32, y: u32) -> u8 {
        (**self).alpha(x, y)
    }
}

/// Largest pixel count an [`RgbaImage`] may hold (1 GiB of pixel data)
pub const MAX_IMAGE_PIXELS: u64 = 1 << 28;

/// `width * height` as a buffer length, or `None` above [`MAX_IMAGE_PIXELS`].
///
/// Decoders call this on header dimensions before allocating anything.
pub fn checked_pixel_count(width: u32, height: u32) -> Option<usize> {
    let pixels = u64::from(width) * u64::from(height);
    if pixels > MAX_IMAGE_PIXELS {
        return None;
    }
    usize::try_from(pixels).ok()
}

/// Owned RGBA image
///
/// # Examples
///
/// ```
/// use alphaseg_core::{AlphaView, RgbaImage};
///
/// let mut img = RgbaImage::new(4, 3).unwrap();
/// img.set_rgba(1, 2, 255, 0, 0, 200).unwrap();
/// assert_eq!(img.alpha(1, 2), 200);
/// assert_eq!(img.alpha(0, 0), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl RgbaImage {
    /// Create a new fully transparent image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, or if
    /// the image would hold more than [`MAX_IMAGE_PIXELS`] pixels.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let pixels = checked_pixel_count(width, height)
            .ok_or(Error::InvalidDimension { width, height })?;
        let data = vec![0u32; pixels];
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create an image filled with one packed pixel value.
    pub fn filled(width: u32, height: u32, pixel: u32) -> Result<Self> {
        let mut img = Self::new(width, height)?;
        img.data.fill(pixel);
        Ok(img)
    }

    /// Build an image from tightly packed RGBA bytes (4 per pixel, row-major).
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLength`] if `bytes.len() != width * height * 4`.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let mut img = Self::new(width, height)?;
        let expected = img.data.len() * 4;
        if bytes.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: bytes.len(),
            });
        }
        for (dst, px) in img.data.iter_mut().zip(bytes.chunks_exact(4)) {
            *dst = crate::color::compose_rgba(px[0], px[1], px[2], px[3]);
        }
        Ok(img)
    }

    /// Export the pixels as tightly packed RGBA bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * 4);
        for &pixel in &self.data {
            let (r, g, b, a) = crate::color::extract_rgba(pixel);
            out.extend_from_slice(&[r, g, b, a]);
        }
        out
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw packed pixel data, row-major.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Mutable raw packed pixel data, row-major.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// Get a row of packed pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Check if two images have the same dimensions
    pub fn sizes_equal(&self, other: &RgbaImage) -> bool {
        self.width == other.width && self.height == other.height
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl AlphaView for RgbaImage {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn alpha(&self, x: u32, y: u32) -> u8 {
        crate::color::alpha(self.data[self.offset(x, y)])
    }
}

/// Bare opacity plane: one byte per pixel, row-major.
///
/// Useful when only the alpha channel is at hand (a mask computed
/// elsewhere, or a synthetic grid in tests).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaPlane {
    width: u32,
    height: u32,
    values: Vec<u8>,
}

impl AlphaPlane {
    /// Wrap a row-major opacity buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLength`] if `values.len() != width * height`.
    pub fn new(width: u32, height: u32, values: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if values.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Parse an ASCII picture: `#` is opaque (255), anything else is
    /// transparent. All rows must have the same length.
    ///
    /// ```
    /// use alphaseg_core::{AlphaPlane, AlphaView};
    ///
    /// let plane = AlphaPlane::from_ascii(&["#.", ".#"]).unwrap();
    /// assert_eq!(plane.alpha(1, 1), 255);
    /// assert_eq!(plane.alpha(1, 0), 0);
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
        let mut values = Vec::with_capacity(width as usize * height as usize);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(Error::InvalidParameter(format!(
                    "row {} has length {}, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            values.extend(row.chars().map(|c| if c == '#' { 255 } else { 0 }));
        }
        Self::new(width, height, values)
    }

    /// Extract the opacity channel of an RGBA image.
    pub fn from_image(img: &RgbaImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            values: img.data().iter().map(|&p| crate::color::alpha(p)).collect(),
        }
    }

    /// Raw opacity values, row-major.
    pub fn values(&self) -> &[u8] {
        &self.values
    }
}

impl AlphaView for AlphaPlane {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn alpha(&self, x: u32, y: u32) -> u8 {
        self.values[y as usize * self.width as usize + x as usize]
    }
}
