//! # zenktx
//!
//! KTX 1.1 texture container decoder, with the OpenGL packed pixel formats
//! and ETC1 block compression behind a pixel-addressable image interface.
//!
//! ## Zero-Copy Decoding
//!
//! Decoding wraps the payload of the first image without converting it.
//! Little-endian files, and every 8-bit format, borrow straight from the input
//! buffer. Big-endian files holding 16-bit packed pixels are byte-swapped into an
//! owned buffer. Pixels are decoded to [`Rgba64`] only when queried.
//!
//! ## Supported Formats
//!
//! | glType | glFormat | Pixel format |
//! |---|---|---|
//! | `UNSIGNED_BYTE` | `LUMINANCE` | [`PixelFormat::Gray8`] |
//! | `UNSIGNED_BYTE` | `LUMINANCE_ALPHA` | [`PixelFormat::GrayAlpha8`] |
//! | `UNSIGNED_BYTE` | `RED` | [`PixelFormat::R8`] |
//! | `UNSIGNED_BYTE` | `RGB` | [`PixelFormat::Rgb8`] |
//! | `UNSIGNED_BYTE` | `BGRA` | [`PixelFormat::Bgra8888`] |
//! | `UNSIGNED_SHORT_5_6_5` | `RGB` | [`PixelFormat::Rgb565`] |
//! | `UNSIGNED_SHORT_4_4_4_4` | `RGBA` | [`PixelFormat::Rgba4444`] |
//! | `UNSIGNED_SHORT_5_5_5_1` | `RGBA` | [`PixelFormat::Rgba5551`] |
//! | 0 | 0 (internal `ETC1_RGB8_OES`) | [`Etc1Image`] |
//!
//! ## Non-Goals
//!
//! - Writing KTX files, and ETC1 compression
//! - KTX 2, supercompression, other block formats
//! - Mipmap chains, cube faces, array layers, depth slices (only the first
//!   image is decoded)
//!
//! ## Usage
//!
//! ```no_run
//! use zenktx::{DecodeRequest, Image, ImageInfo, Unstoppable};
//!
//! let data: &[u8] = &[]; // your KTX bytes
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.format);
//!
//! // Decode (zero-copy when possible)
//! let decoded = DecodeRequest::new(data).decode(Unstoppable)?;
//! let c = decoded.pixel_at(0, 0).to_rgba64();
//! println!("{:04X} {:04X} {:04X} {:04X}", c.r, c.g, c.b, c.a);
//! # Ok::<(), zenktx::KtxError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod color;
mod decode;
mod error;
mod etc1;
mod image;
mod info;
mod limits;
mod pixel;

pub mod ktx;

// Re-exports
pub use color::{
    Bgra8888, Color, Gray8, GrayAlpha8, PackedPixel, R8, Rgb8, Rgb565, Rgba4444, Rgba5551, Rgba64,
};
pub use decode::{DecodeOutput, DecodeRequest, KtxImage};
pub use enough::{Stop, Unstoppable};
pub use error::KtxError;
pub use etc1::{BLOCK_SIZE, BLOCK_WIDTH, BlockCompressedImage, Etc1Image, decode_block_pixel};
#[cfg(feature = "imgref")]
pub use image::to_imgvec;
pub use image::{Image, PlanarImage, Rect, convert_image};
pub use info::{ImageInfo, TextureFormat};
pub use limits::Limits;
pub use pixel::PixelFormat;

/// Decode the first image of a KTX file.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodeOutput<'_>, KtxError> {
    DecodeRequest::new(data).decode(stop)
}

/// Parse the header and select the pixel format without reading pixel data.
pub fn decode_config(data: &[u8]) -> Result<ImageInfo, KtxError> {
    ImageInfo::from_bytes(data)
}

/// Read a whole KTX stream and decode its first image.
#[cfg(feature = "std")]
pub fn decode_reader(
    mut reader: impl std::io::Read,
    stop: impl Stop,
) -> Result<DecodeOutput<'static>, KtxError> {
    let mut data = alloc::vec::Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(decode(&data, stop)?.into_owned())
}
