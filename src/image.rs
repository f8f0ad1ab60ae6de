//! Pixel-addressable images over packed pixel formats.

use alloc::borrow::Cow;
use alloc::vec;

use enough::Stop;

use crate::color::Color;
use crate::error::KtxError;
use crate::limits::{Limits, check_buffer};
use crate::pixel::PixelFormat;

/// Integer rectangle, inclusive of `min` and exclusive of `max`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Rect {
    /// Build a rectangle from two corners, swapping coordinates so that min <= max.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    /// Rectangle anchored at the origin.
    pub fn from_size(width: u32, height: u32) -> Self {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        Self::new(0, 0, w, h)
    }

    pub fn width(&self) -> u32 {
        self.max_x.abs_diff(self.min_x)
    }

    pub fn height(&self) -> u32 {
        self.max_y.abs_diff(self.min_y)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.min_x <= x && x < self.max_x && self.min_y <= y && y < self.max_y
    }

    /// Offset of `(x, y)` from the top-left corner. `(x, y)` must be inside.
    pub(crate) fn local(&self, x: i32, y: i32) -> (usize, usize) {
        (
            x.abs_diff(self.min_x) as usize,
            y.abs_diff(self.min_y) as usize,
        )
    }
}

/// Read access shared by every image kind.
pub trait Image {
    /// Addressable domain of the image.
    fn bounds(&self) -> Rect;

    /// Format every [`Image::pixel_at`] result is stored in.
    fn color_model(&self) -> PixelFormat;

    /// Pixel at `(x, y)`, or the color model's zero value outside [`Image::bounds`].
    fn pixel_at(&self, x: i32, y: i32) -> Color;
}

/// Stride-addressed pixel buffer in one [`PixelFormat`].
///
/// The buffer borrows from the decoder input until the first
/// [`PlanarImage::set_pixel`], which copies it.
#[derive(Clone, Debug)]
pub struct PlanarImage<'a> {
    pix: Cow<'a, [u8]>,
    stride: usize,
    rect: Rect,
    format: PixelFormat,
}

impl PlanarImage<'static> {
    /// Zero-filled image covering `rect`.
    pub fn new(rect: Rect, format: PixelFormat) -> Self {
        let stride = rect.width() as usize * format.bytes_per_pixel();
        let pix = vec![0u8; stride * rect.height() as usize];
        Self {
            pix: Cow::Owned(pix),
            stride,
            rect,
            format,
        }
    }
}

impl<'a> PlanarImage<'a> {
    /// Wrap existing pixel bytes.
    ///
    /// Fails with [`KtxError::BufferTooSmall`] unless `pix` holds `stride`
    /// bytes for every row but the last, plus one packed row.
    pub fn from_bytes(
        pix: impl Into<Cow<'a, [u8]>>,
        stride: usize,
        rect: Rect,
        format: PixelFormat,
    ) -> Result<Self, KtxError> {
        let pix = pix.into();
        let needed = required_len(stride, rect, format).ok_or(KtxError::DimensionsTooLarge {
            width: rect.width(),
            height: rect.height(),
        })?;
        if pix.len() < needed {
            return Err(KtxError::BufferTooSmall {
                needed,
                actual: pix.len(),
            });
        }
        Ok(Self {
            pix,
            stride,
            rect,
            format,
        })
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Raw pixel bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pix
    }

    /// Whether the pixel data is still borrowed from the input.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pix, Cow::Borrowed(_))
    }

    /// Byte offset of `(x, y)`. `(x, y)` must be inside the bounds.
    pub fn pix_offset(&self, x: i32, y: i32) -> usize {
        let (lx, ly) = self.rect.local(x, y);
        ly * self.stride + lx * self.format.bytes_per_pixel()
    }

    /// Store `c` at `(x, y)`, converting it to this image's format.
    /// Does nothing outside the bounds.
    pub fn set_pixel(&mut self, x: i32, y: i32, c: Color) {
        if !self.rect.contains(x, y) {
            return;
        }
        let i = self.pix_offset(x, y);
        let bpp = self.format.bytes_per_pixel();
        let c = self.format.convert(c);
        c.write(&mut self.pix.to_mut()[i..i + bpp]);
    }

    /// Take ownership of the pixel data (copies if borrowed).
    pub fn into_owned(self) -> PlanarImage<'static> {
        PlanarImage {
            pix: Cow::Owned(self.pix.into_owned()),
            stride: self.stride,
            rect: self.rect,
            format: self.format,
        }
    }
}

impl Image for PlanarImage<'_> {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn color_model(&self) -> PixelFormat {
        self.format
    }

    fn pixel_at(&self, x: i32, y: i32) -> Color {
        if !self.rect.contains(x, y) {
            return self.format.zero();
        }
        let i = self.pix_offset(x, y);
        match self.pix.get(i..i + self.format.bytes_per_pixel()) {
            Some(bytes) => self.format.read(bytes),
            None => self.format.zero(),
        }
    }
}

/// Bytes needed for `rect` at `stride`: full rows except the last, which
/// only needs its pixels.
pub(crate) fn required_len(stride: usize, rect: Rect, format: PixelFormat) -> Option<usize> {
    let h = rect.height() as usize;
    if h == 0 || rect.width() == 0 {
        return Some(0);
    }
    let row = (rect.width() as usize).checked_mul(format.bytes_per_pixel())?;
    if stride < row {
        return None;
    }
    stride.checked_mul(h - 1)?.checked_add(row)
}

/// Copy every pixel of `src` into a new planar image of `format`.
///
/// `limits` are checked against the new buffer before it is allocated.
pub fn convert_image(
    src: &dyn Image,
    format: PixelFormat,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PlanarImage<'static>, KtxError> {
    let rect = src.bounds();
    check_buffer(limits, rect, format)?;
    let mut out = PlanarImage::new(rect, format);
    for (row_idx, y) in (rect.min_y..rect.max_y).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for x in rect.min_x..rect.max_x {
            out.set_pixel(x, y, src.pixel_at(x, y));
        }
    }
    Ok(out)
}

/// Materialize `src` as canonical 16-bit RGBA pixels.
#[cfg(feature = "imgref")]
pub fn to_imgvec(
    src: &dyn Image,
    limits: Option<&Limits>,
) -> Result<imgref::ImgVec<rgb::Rgba<u16>>, KtxError> {
    let rect = src.bounds();
    check_buffer(limits, rect, PixelFormat::Rgba64)?;
    let mut buf = alloc::vec::Vec::with_capacity(rect.width() as usize * rect.height() as usize);
    for y in rect.min_y..rect.max_y {
        for x in rect.min_x..rect.max_x {
            buf.push(rgb::Rgba::<u16>::from(src.pixel_at(x, y).to_rgba64()));
        }
    }
    Ok(imgref::ImgVec::new(
        buf,
        rect.width() as usize,
        rect.height() as usize,
    ))
}
