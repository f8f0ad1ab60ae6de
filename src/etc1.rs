//! ETC1 block-compressed textures.
//!
//! Each 8-byte block covers a 4×4 tile split into two 2×4 or 4×2 sub-blocks,
//! each with its own base color and modifier table:
//!
//! ```plain
//! byte 0..3   base colors: R, G, B in individual (4+4) or differential (5+3) form
//! byte 3      table1[7:5] table2[4:2] diff[1] flip[0]
//! byte 4..5   pixel index MSB plane
//! byte 6..7   pixel index LSB plane
//! ```
//!
//! Pixels are decoded on every query; nothing is cached.

use alloc::borrow::Cow;

use enough::Stop;

use crate::color::{Color, Rgb8};
use crate::error::KtxError;
use crate::image::{Image, PlanarImage, Rect};
use crate::limits::{Limits, check_buffer};
use crate::pixel::PixelFormat;

/// Pixels per block edge.
pub const BLOCK_WIDTH: usize = 4;
/// Bytes per compressed block.
pub const BLOCK_SIZE: usize = 8;

/// Luminance modifiers, indexed by `[table selector][pixel index]`.
const CODEWORD_TABLE: [[i16; 4]; 8] = [
    [-8, -2, 2, 8],
    [-17, -5, 5, 17],
    [-29, -9, 9, 29],
    [-42, -13, 13, 42],
    [-60, -18, 18, 60],
    [-80, -24, 24, 80],
    [-106, -33, 33, 106],
    [-183, -47, 47, 183],
];

/// Maps the stored 2-bit pixel index to its column in [`CODEWORD_TABLE`].
const MODIFIER_INDEX: [usize; 4] = [2, 3, 1, 0];

#[inline]
const fn extend_5_to_8(v: u8) -> u8 {
    let v = v & 0x1F;
    (v << 3) | (v >> 2)
}

#[inline]
const fn extend_4_to_8(v: u8) -> u8 {
    let v = v & 0x0F;
    (v << 4) | v
}

/// 5-bit base plus the signed 3-bit delta held in `delta`'s low bits, modulo 32.
#[inline]
const fn add_delta_5(base: u8, delta: u8) -> u8 {
    let d = ((delta << 5) as i8) >> 5;
    (base as i8).wrapping_add(d) as u8 & 0x1F
}

#[inline]
fn clamp_add(v: u8, modifier: i16) -> u8 {
    (i16::from(v) + modifier).clamp(0, 0xFF) as u8
}

/// Bytes of block storage for a `width`×`height` texture.
pub fn encoded_size(width: u32, height: u32) -> Option<usize> {
    let (bw, bh) = block_grid(width, height);
    bw.checked_mul(bh)?.checked_mul(BLOCK_SIZE)
}

fn block_grid(width: u32, height: u32) -> (usize, usize) {
    (
        (width as usize).div_ceil(BLOCK_WIDTH),
        (height as usize).div_ceil(BLOCK_WIDTH),
    )
}

/// Decode one pixel of a block. Coordinates are taken modulo 4, so texture
/// coordinates address the pixel at the same position within the block.
pub fn decode_block_pixel(block: &[u8; BLOCK_SIZE], local_x: usize, local_y: usize) -> Rgb8 {
    let (local_x, local_y) = (local_x % BLOCK_WIDTH, local_y % BLOCK_WIDTH);

    let diff = block[3] & 0x02 != 0;
    let flip = block[3] & 0x01 != 0;

    let in_first = if flip { local_y < 2 } else { local_x < 2 };

    // Column-major bit position; the high byte of each plane holds bits 8..15.
    let offset = local_x * BLOCK_WIDTH + local_y;
    let (msb, lsb) = if offset >= 8 {
        let shift = offset - 8;
        ((block[4] >> shift) & 1, (block[6] >> shift) & 1)
    } else {
        ((block[5] >> offset) & 1, (block[7] >> offset) & 1)
    };
    let pixel_index = usize::from((msb << 1) | lsb);

    let (r, g, b, table) = if in_first {
        let (r, g, b) = if diff {
            (
                extend_5_to_8(block[0] >> 3),
                extend_5_to_8(block[1] >> 3),
                extend_5_to_8(block[2] >> 3),
            )
        } else {
            (
                extend_4_to_8(block[0] >> 4),
                extend_4_to_8(block[1] >> 4),
                extend_4_to_8(block[2] >> 4),
            )
        };
        (r, g, b, (block[3] >> 5) & 0x07)
    } else {
        let (r, g, b) = if diff {
            let channel = |byte: u8| extend_5_to_8(add_delta_5(byte >> 3, byte));
            // Blue comes from byte 1 and green from byte 2 in this path.
            (channel(block[0]), channel(block[2]), channel(block[1]))
        } else {
            (
                extend_4_to_8(block[0]),
                extend_4_to_8(block[1]),
                extend_4_to_8(block[2]),
            )
        };
        (r, g, b, (block[3] >> 2) & 0x07)
    };

    let modifier = CODEWORD_TABLE[usize::from(table)][MODIFIER_INDEX[pixel_index]];
    Rgb8::new(
        clamp_add(r, modifier),
        clamp_add(g, modifier),
        clamp_add(b, modifier),
    )
}

/// Access shared by block-compressed images.
pub trait BlockCompressedImage: Image {
    /// Blocks across and down.
    fn block_dimensions(&self) -> (usize, usize);

    /// Replace the block data with a compressed rendition of `src`.
    fn compress(&mut self, src: &dyn Image) -> Result<(), KtxError>;

    /// Decode every pixel into a planar image. `limits` are checked against
    /// the decoded buffer before it is allocated.
    fn decompress(
        &self,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<PlanarImage<'static>, KtxError>;
}

/// ETC1 texture backed by raw block bytes.
#[derive(Clone, Debug)]
pub struct Etc1Image<'a> {
    pix: Cow<'a, [u8]>,
    rect: Rect,
}

impl Etc1Image<'static> {
    /// Texture covering `rect` with zeroed blocks.
    pub fn new(rect: Rect) -> Result<Self, KtxError> {
        let size = encoded_size(rect.width(), rect.height()).ok_or(
            KtxError::DimensionsTooLarge {
                width: rect.width(),
                height: rect.height(),
            },
        )?;
        Ok(Self {
            pix: Cow::Owned(alloc::vec![0u8; size]),
            rect,
        })
    }
}

impl<'a> Etc1Image<'a> {
    /// Wrap existing block data. Bytes past the last block are ignored.
    pub fn from_bytes(pix: impl Into<Cow<'a, [u8]>>, rect: Rect) -> Result<Self, KtxError> {
        let pix = pix.into();
        let needed = encoded_size(rect.width(), rect.height()).ok_or(
            KtxError::DimensionsTooLarge {
                width: rect.width(),
                height: rect.height(),
            },
        )?;
        if pix.len() < needed {
            return Err(KtxError::BufferTooSmall {
                needed,
                actual: pix.len(),
            });
        }
        Ok(Self { pix, rect })
    }

    /// Raw block bytes.
    pub fn blocks(&self) -> &[u8] {
        &self.pix
    }

    /// Whether the block data is still borrowed from the input.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pix, Cow::Borrowed(_))
    }

    /// The 8 bytes of block `(bx, by)`, if it exists.
    pub fn block(&self, bx: usize, by: usize) -> Option<&[u8; BLOCK_SIZE]> {
        let (bw, bh) = self.block_dimensions();
        if bx >= bw || by >= bh {
            return None;
        }
        let start = (by * bw + bx) * BLOCK_SIZE;
        self.pix.get(start..start + BLOCK_SIZE)?.try_into().ok()
    }

    /// Take ownership of the block data (copies if borrowed).
    pub fn into_owned(self) -> Etc1Image<'static> {
        Etc1Image {
            pix: Cow::Owned(self.pix.into_owned()),
            rect: self.rect,
        }
    }

    fn rgb_at(&self, x: i32, y: i32) -> Option<Rgb8> {
        if !self.rect.contains(x, y) {
            return None;
        }
        let (lx, ly) = self.rect.local(x, y);
        let block = self.block(lx / BLOCK_WIDTH, ly / BLOCK_WIDTH)?;
        Some(decode_block_pixel(
            block,
            lx % BLOCK_WIDTH,
            ly % BLOCK_WIDTH,
        ))
    }
}

impl Image for Etc1Image<'_> {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn color_model(&self) -> PixelFormat {
        PixelFormat::Rgb8
    }

    fn pixel_at(&self, x: i32, y: i32) -> Color {
        self.rgb_at(x, y).unwrap_or_default().into()
    }
}

impl BlockCompressedImage for Etc1Image<'_> {
    fn block_dimensions(&self) -> (usize, usize) {
        block_grid(self.rect.width(), self.rect.height())
    }

    fn compress(&mut self, _src: &dyn Image) -> Result<(), KtxError> {
        Err(KtxError::NotImplemented("ETC1 compression"))
    }

    fn decompress(
        &self,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<PlanarImage<'static>, KtxError> {
        check_buffer(limits, self.rect, PixelFormat::Rgb8)?;
        let mut out = PlanarImage::new(self.rect, PixelFormat::Rgb8);
        for (row_idx, y) in (self.rect.min_y..self.rect.max_y).enumerate() {
            if row_idx % 16 == 0 {
                stop.check()?;
            }
            for x in self.rect.min_x..self.rect.max_x {
                if let Some(c) = self.rgb_at(x, y) {
                    out.set_pixel(x, y, c.into());
                }
            }
        }
        Ok(out)
    }
}
