//! BMP image format support
//!
//! Reads uncompressed 24-bit and 32-bit Windows Bitmap files and writes
//! 32-bit BGRA. A 32-bit file whose fourth byte is zero everywhere is
//! treated as having no alpha channel and decodes as fully opaque.

use crate::{IoError, IoResult};
use alphaseg_core::{RgbaImage, checked_pixel_count, color};
use std::io::{Read, Write};

/// BMP file header size
const BMP_FILE_HEADER_SIZE: usize = 14;

/// BMP info header size (BITMAPINFOHEADER)
const BMP_INFO_HEADER_SIZE: u32 = 40;

/// BI_RGB
const COMPRESSION_NONE: u32 = 0;

/// BI_BITFIELDS, accepted for 32-bit files laid out as BGRA
const COMPRESSION_BITFIELDS: u32 = 3;

fn le_u16(b: &[u8]) -> u16 {
    u16::from_le_bytes([b[0], b[1]])
}

fn le_u32(b: &[u8]) -> u32 {
    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

fn le_i32(b: &[u8]) -> i32 {
    i32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

/// Read a BMP image
pub fn read_bmp<R: Read>(mut reader: R) -> IoResult<RgbaImage> {
    let mut file_header = [0u8; BMP_FILE_HEADER_SIZE];
    reader.read_exact(&mut file_header).map_err(IoError::Io)?;

    if &file_header[0..2] != b"BM" {
        return Err(IoError::InvalidData("not a BMP file".to_string()));
    }

    let pixel_offset = le_u32(&file_header[10..14]) as usize;

    let mut info_header = [0u8; 40];
    reader.read_exact(&mut info_header).map_err(IoError::Io)?;

    let header_size = le_u32(&info_header[0..4]);
    if header_size < BMP_INFO_HEADER_SIZE {
        return Err(IoError::InvalidData(format!(
            "unsupported BMP header size: {}",
            header_size
        )));
    }

    let width = le_i32(&info_header[4..8]);
    let height = le_i32(&info_header[8..12]);

    let planes = le_u16(&info_header[12..14]);
    if planes != 1 {
        return Err(IoError::InvalidData(format!(
            "unsupported number of planes: {}",
            planes
        )));
    }

    let bits_per_pixel = le_u16(&info_header[14..16]);
    let compression = le_u32(&info_header[16..20]);

    if compression != COMPRESSION_NONE && compression != COMPRESSION_BITFIELDS {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP compression: {}",
            compression
        )));
    }

    if bits_per_pixel != 24 && bits_per_pixel != 32 {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP bit depth: {}",
            bits_per_pixel
        )));
    }

    let width = width.unsigned_abs();
    let top_down = height < 0;
    let height = height.unsigned_abs();

    if width == 0 || height == 0 || checked_pixel_count(width, height).is_none() {
        return Err(IoError::InvalidData(format!(
            "unsupported BMP dimensions: {}x{}",
            width, height
        )));
    }

    // Skip any extended header fields and bit masks up to the pixel data
    let current_pos = BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE as usize;
    if pixel_offset > current_pos {
        let mut skip = vec![0u8; pixel_offset - current_pos];
        reader.read_exact(&mut skip).map_err(IoError::Io)?;
    }

    let mut img = RgbaImage::new(width, height)?;

    // BMP rows are 4-byte aligned
    let row_stride = (width as usize * bits_per_pixel as usize).div_ceil(32) * 4;
    let mut row_buffer = vec![0u8; row_stride];
    let mut any_alpha = false;

    for row in 0..height {
        reader.read_exact(&mut row_buffer).map_err(IoError::Io)?;

        let y = if top_down { row } else { height - 1 - row };

        for x in 0..width {
            let pixel = if bits_per_pixel == 24 {
                let idx = x as usize * 3;
                color::compose_rgb(row_buffer[idx + 2], row_buffer[idx + 1], row_buffer[idx])
            } else {
                let idx = x as usize * 4;
                let a = row_buffer[idx + 3];
                any_alpha |= a != 0;
                color::compose_rgba(
                    row_buffer[idx + 2],
                    row_buffer[idx + 1],
                    row_buffer[idx],
                    a,
                )
            };
            img.set_pixel_unchecked(x, y, pixel);
        }
    }

    if bits_per_pixel == 32 && !any_alpha {
        for pixel in img.data_mut() {
            *pixel |= 0xff;
        }
    }

    Ok(img)
}

/// Write a BMP image (32-bit BGRA, bottom-up)
pub fn write_bmp<W: Write>(img: &RgbaImage, mut writer: W) -> IoResult<()> {
    let width = img.width();
    let height = img.height();
    let bits_per_pixel: u16 = 32;

    let row_stride = width as usize * 4;
    let pixel_data_size = row_stride * height as usize;
    let pixel_offset = BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE as usize;
    let file_size = pixel_offset + pixel_data_size;

    let file_size = u32::try_from(file_size)
        .map_err(|_| IoError::EncodeError(format!("image too large for BMP: {}x{}", width, height)))?;

    // File header
    writer.write_all(b"BM")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(&[0u8; 4])?; // Reserved
    writer.write_all(&(pixel_offset as u32).to_le_bytes())?;

    // Info header
    writer.write_all(&BMP_INFO_HEADER_SIZE.to_le_bytes())?;
    writer.write_all(&(width as i32).to_le_bytes())?;
    writer.write_all(&(height as i32).to_le_bytes())?; // Bottom-up
    writer.write_all(&1u16.to_le_bytes())?; // Planes
    writer.write_all(&bits_per_pixel.to_le_bytes())?;
    writer.write_all(&COMPRESSION_NONE.to_le_bytes())?;
    writer.write_all(&(pixel_data_size as u32).to_le_bytes())?;
    writer.write_all(&0i32.to_le_bytes())?; // X pixels per meter
    writer.write_all(&0i32.to_le_bytes())?; // Y pixels per meter
    writer.write_all(&0u32.to_le_bytes())?; // Colors used
    writer.write_all(&0u32.to_le_bytes())?; // Important colors

    let mut row_buffer = vec![0u8; row_stride];
    for row in 0..height {
        let y = height - 1 - row;
        for (x, &pixel) in img.row_data(y).iter().enumerate() {
            let (r, g, b, a) = color::extract_rgba(pixel);
            row_buffer[x * 4..x * 4 + 4].copy_from_slice(&[b, g, r, a]);
        }
        writer.write_all(&row_buffer)?;
    }

    Ok(())
}
