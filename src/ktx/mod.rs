//! KTX 1.1 container decoding (internal).
//!
//! Only the first image is decoded: mip level 0, array element 0, face 0,
//! slice 0. Payloads are wrapped without pixel conversion, borrowing from
//! the input whenever the stored bytes already match the in-memory layout.

pub mod gl;
mod header;

pub use header::{Endian, HEADER_LEN, KeyValue, KeyValues, KtxHeader, MAGIC, parse_header};

use alloc::borrow::Cow;
use alloc::vec::Vec;

use enough::Stop;

use crate::decode::{DecodeOutput, KtxImage};
use crate::error::KtxError;
use crate::etc1::{self, Etc1Image};
use crate::image::{PlanarImage, Rect, required_len};
use crate::info::{ImageInfo, TextureFormat};
use crate::limits::Limits;
use crate::pixel::PixelFormat;

use gl::*;
use header::Cursor;

/// Select the texture format for a `(glType, glFormat)` pair, or
/// `glInternalFormat` for compressed data.
pub fn texture_format(header: &KtxHeader) -> Result<TextureFormat, KtxError> {
    let format = match (header.gl_type, header.gl_format) {
        (GL_UNSIGNED_BYTE, GL_LUMINANCE) => PixelFormat::Gray8,
        (GL_UNSIGNED_BYTE, GL_LUMINANCE_ALPHA) => PixelFormat::GrayAlpha8,
        (GL_UNSIGNED_BYTE, GL_RED) => PixelFormat::R8,
        (GL_UNSIGNED_BYTE, GL_RGB) => PixelFormat::Rgb8,
        (GL_UNSIGNED_BYTE, GL_BGRA) => PixelFormat::Bgra8888,
        (GL_UNSIGNED_SHORT_5_6_5, GL_RGB) => PixelFormat::Rgb565,
        (GL_UNSIGNED_SHORT_4_4_4_4, GL_RGBA) => PixelFormat::Rgba4444,
        (GL_UNSIGNED_SHORT_5_5_5_1, GL_RGBA) => PixelFormat::Rgba5551,
        (0, 0) if header.gl_internal_format == GL_ETC1_RGB8_OES => {
            return Ok(TextureFormat::Etc1);
        }
        _ => {
            return Err(KtxError::UnsupportedFormatCombination {
                gl_type: header.gl_type,
                gl_format: header.gl_format,
                gl_internal_format: header.gl_internal_format,
            });
        }
    };
    Ok(TextureFormat::Packed(format))
}

/// Header and format without touching the payload.
pub(crate) fn probe(data: &[u8]) -> Result<ImageInfo, KtxError> {
    let header = parse_header(data)?;
    let format = texture_format(&header)?;
    let (width, height) = header.dimensions();
    Ok(ImageInfo {
        width,
        height,
        format,
        header,
    })
}

/// Decode the first image of a KTX file.
pub(crate) fn decode<'a>(
    data: &'a [u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput<'a>, KtxError> {
    let ImageInfo {
        width,
        height,
        format,
        header,
    } = probe(data)?;
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(KtxError::DimensionsTooLarge { width, height });
    }
    if let Some(limits) = limits {
        limits.check(width, height)?;
    }
    warn_ignored(&header);

    let mut cursor = Cursor::at(data, HEADER_LEN)?;
    let kv = cursor.take(header.key_value_bytes as usize)?;
    let image_size = cursor.get_u32(header.endian)? as usize;
    let rect = Rect::from_size(width, height);

    let image = match format {
        TextureFormat::Etc1 => {
            let needed = etc1::encoded_size(width, height)
                .ok_or(KtxError::DimensionsTooLarge { width, height })?;
            if let Some(limits) = limits {
                limits.check_memory(needed)?;
            }
            warn_image_size(image_size, needed);
            stop.check()?;
            let blocks = cursor.take(needed)?;
            KtxImage::Etc1(Etc1Image::from_bytes(blocks, rect)?)
        }
        TextureFormat::Packed(pixel_format) => {
            let row = (width as usize)
                .checked_mul(pixel_format.bytes_per_pixel())
                .ok_or(KtxError::DimensionsTooLarge { width, height })?;
            let stride = row_stride(row, height as usize, image_size);
            let needed = required_len(stride, rect, pixel_format)
                .ok_or(KtxError::DimensionsTooLarge { width, height })?;
            if let Some(limits) = limits {
                limits.check_memory(needed)?;
            }
            warn_image_size(image_size, stride.saturating_mul(height as usize));
            stop.check()?;
            let pixels = cursor.take(needed)?;
            let pixels: Cow<'a, [u8]> =
                if header.endian == Endian::Big && is_packed_u16(header.gl_type) {
                    Cow::Owned(swap_words(pixels, stride, row, stop)?)
                } else {
                    Cow::Borrowed(pixels)
                };
            KtxImage::Planar(PlanarImage::from_bytes(pixels, stride, rect, pixel_format)?)
        }
    };

    Ok(DecodeOutput::new(
        image,
        width,
        height,
        format,
        header,
        Cow::Borrowed(kv),
        limits.cloned(),
    ))
}

/// Rows are tightly packed unless `imageSize` covers 4-byte aligned rows.
fn row_stride(row: usize, height: usize, image_size: usize) -> usize {
    match row.checked_next_multiple_of(4) {
        Some(padded) if padded != row && image_size >= padded.saturating_mul(height) => padded,
        _ => row,
    }
}

fn is_packed_u16(gl_type: u32) -> bool {
    matches!(
        gl_type,
        GL_UNSIGNED_SHORT_5_6_5 | GL_UNSIGNED_SHORT_4_4_4_4 | GL_UNSIGNED_SHORT_5_5_5_1
    )
}

/// Copy big-endian 16-bit words into little-endian storage.
fn swap_words(
    pixels: &[u8],
    stride: usize,
    row: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, KtxError> {
    let mut out = pixels.to_vec();
    for (y, line) in out.chunks_mut(stride.max(1)).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        let n = row.min(line.len());
        for word in line[..n].chunks_exact_mut(2) {
            word.swap(0, 1);
        }
    }
    Ok(out)
}

fn warn_image_size(image_size: usize, expected: usize) {
    if image_size != expected {
        log::warn!("ktx: imageSize {image_size} does not match expected {expected}");
    }
}

fn warn_ignored(header: &KtxHeader) {
    if header.pixel_depth > 1 {
        log::warn!("ktx: depth {} ignored, decoding slice 0", header.pixel_depth);
    }
    if header.array_elements > 1 {
        log::warn!(
            "ktx: {} array elements ignored, decoding element 0",
            header.array_elements
        );
    }
    if header.faces > 1 {
        log::warn!("ktx: {} faces ignored, decoding face 0", header.faces);
    }
    if header.mip_levels > 1 {
        log::warn!("ktx: {} mip levels ignored, decoding level 0", header.mip_levels);
    }
}
