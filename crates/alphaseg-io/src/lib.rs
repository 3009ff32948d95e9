//! alphaseg-io - Image I/O for alpha-region segmentation
//!
//! Decodes image files into [`RgbaImage`] and encodes them back.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG    | Yes  | Yes   | `png-format` (default) |
//! | BMP    | Yes  | Yes   | `bmp` (default) |
//!
//! Input files are identified by magic number, output files by extension.
//! The [`ImageCodec`] trait lets callers substitute their own codec.

#[cfg(feature = "bmp")]
pub mod bmp;
pub mod codec;
mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;

pub use alphaseg_core::RgbaImage;
pub use codec::{FileCodec, ImageCodec};
pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file path, sniffing the format from its header.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<RgbaImage> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let file = File::open(path)?;
    read_image_format(BufReader::new(file), format)
}

/// Read an image from memory, sniffing the format from its header.
pub fn read_image_mem(data: &[u8]) -> IoResult<RgbaImage> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

fn read_image_format<R: std::io::BufRead + std::io::Seek>(
    reader: R,
    format: ImageFormat,
) -> IoResult<RgbaImage> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::read_bmp(reader),
        other => Err(IoError::UnsupportedFormat(format!(
            "reading {} is not supported",
            other
        ))),
    }
}

/// Write an image to a file path in the given format.
///
/// The file is created (or truncated) only once the format is known to
/// be writable.
pub fn write_image<P: AsRef<Path>>(img: &RgbaImage, path: P, format: ImageFormat) -> IoResult<()> {
    ensure_writable(format)?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_image_format(img, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into memory in the given format.
pub fn write_image_mem(img: &RgbaImage, format: ImageFormat) -> IoResult<Vec<u8>> {
    ensure_writable(format)?;
    let mut buffer = Vec::new();
    write_image_format(img, &mut buffer, format)?;
    Ok(buffer)
}

fn ensure_writable(format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => Ok(()),
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => Ok(()),
        other => Err(IoError::UnsupportedFormat(format!(
            "writing {} is not supported",
            other
        ))),
    }
}

fn write_image_format<W: Write>(img: &RgbaImage, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(img, writer),
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::write_bmp(img, writer),
        other => Err(IoError::UnsupportedFormat(format!(
            "writing {} is not supported",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mem_roundtrip_png_and_bmp() {
        let mut img = RgbaImage::new(3, 3).unwrap();
        img.set_rgba(1, 1, 10, 20, 30, 40).unwrap();

        for format in [ImageFormat::Png, ImageFormat::Bmp] {
            let bytes = write_image_mem(&img, format).unwrap();
            assert_eq!(detect_format_from_bytes(&bytes).unwrap(), format);
            assert_eq!(read_image_mem(&bytes).unwrap(), img);
        }
    }

    #[test]
    fn test_write_unsupported_format() {
        let img = RgbaImage::new(1, 1).unwrap();
        let err = write_image_mem(&img, ImageFormat::Jpeg).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_read_unsupported_format() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0];
        let err = read_image_mem(&data).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }
}
