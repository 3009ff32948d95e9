//! Codec abstraction
//!
//! The export pipeline never calls the format modules directly; it goes
//! through [`ImageCodec`] so that tests (or embedders with their own
//! decoders) can swap the implementation.

use crate::format::ImageFormat;
use crate::{IoError, IoResult, read_image, write_image};
use alphaseg_core::RgbaImage;
use std::path::Path;
use tracing::debug;

/// Decode files into pixel grids and encode pixel grids into files.
pub trait ImageCodec: Send + Sync {
    /// Decode the image stored at `path`.
    fn decode(&self, path: &Path) -> IoResult<RgbaImage>;

    /// Encode `img` and write it to `path`, replacing any existing file.
    fn encode(&self, img: &RgbaImage, path: &Path) -> IoResult<()>;
}

impl<T: ImageCodec + ?Sized> ImageCodec for &T {
    fn decode(&self, path: &Path) -> IoResult<RgbaImage> {
        (**self).decode(path)
    }

    fn encode(&self, img: &RgbaImage, path: &Path) -> IoResult<()> {
        (**self).encode(img, path)
    }
}

/// Default codec backed by this crate's format modules.
///
/// Decoding sniffs the format from the file header; encoding picks the
/// format from the output path's extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCodec;

impl ImageCodec for FileCodec {
    fn decode(&self, path: &Path) -> IoResult<RgbaImage> {
        let img = read_image(path)?;
        debug!(
            path = %path.display(),
            width = img.width(),
            height = img.height(),
            "decoded image"
        );
        Ok(img)
    }

    fn encode(&self, img: &RgbaImage, path: &Path) -> IoResult<()> {
        let format = ImageFormat::from_path(path);
        if format == ImageFormat::Unknown {
            return Err(IoError::UnsupportedFormat(format!(
                "cannot choose an encoder for '{}'",
                path.display()
            )));
        }
        write_image(img, path, format)?;
        debug!(path = %path.display(), %format, "encoded image");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_unknown_extension_rejected() {
        let img = RgbaImage::new(1, 1).unwrap();
        let err = FileCodec.encode(&img, Path::new("out.xyz")).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_decode_missing_file() {
        let err = FileCodec
            .decode(Path::new("/nonexistent/alphaseg/input.png"))
            .unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }
}
