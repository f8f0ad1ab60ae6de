use crate::color::{
    Bgra8888, Color, Gray8, GrayAlpha8, PackedPixel, R8, Rgb8, Rgb565, Rgba4444, Rgba5551, Rgba64,
};

/// Pixel format of an image: its color model and storage layout.
///
/// 16-bit packed formats are stored little-endian.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Single channel, 8-bit grayscale.
    Gray8,
    /// 8-bit gray then 8-bit alpha, non-premultiplied.
    GrayAlpha8,
    /// Single 8-bit red channel, opaque.
    R8,
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 16-bit 5-6-5 RGB.
    Rgb565,
    /// 16-bit 4-4-4-4 RGBA, non-premultiplied.
    Rgba4444,
    /// 16-bit 5-5-5-1 RGBA.
    Rgba5551,
    /// 4 channels, 8-bit BGRA, non-premultiplied.
    Bgra8888,
    /// 4 channels, 16-bit canonical RGBA.
    Rgba64,
}

impl PixelFormat {
    /// Bytes per pixel for this format.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 | Self::R8 => 1,
            Self::GrayAlpha8 | Self::Rgb565 | Self::Rgba4444 | Self::Rgba5551 => 2,
            Self::Rgb8 => 3,
            Self::Bgra8888 => 4,
            Self::Rgba64 => 8,
        }
    }

    /// Bit width of the R, G, B and A fields, in that order.
    ///
    /// Gray formats report the gray width for all three color channels.
    /// A zero width means the channel is absent.
    pub fn channel_bits(&self) -> [u8; 4] {
        match self {
            Self::Gray8 => [8, 8, 8, 0],
            Self::GrayAlpha8 => [8, 8, 8, 8],
            Self::R8 => [8, 0, 0, 0],
            Self::Rgb8 => [8, 8, 8, 0],
            Self::Rgb565 => [5, 6, 5, 0],
            Self::Rgba4444 => [4, 4, 4, 4],
            Self::Rgba5551 => [5, 5, 5, 1],
            Self::Bgra8888 => [8, 8, 8, 8],
            Self::Rgba64 => [16, 16, 16, 16],
        }
    }

    /// Storage order of the channels, most significant field or first byte first.
    pub fn channel_order(&self) -> &'static str {
        match self {
            Self::Gray8 => "Y",
            Self::GrayAlpha8 => "YA",
            Self::R8 => "R",
            Self::Rgb8 | Self::Rgb565 => "RGB",
            Self::Rgba4444 | Self::Rgba5551 | Self::Rgba64 => "RGBA",
            Self::Bgra8888 => "BGRA",
        }
    }

    /// Number of stored channels.
    pub fn channels(&self) -> usize {
        self.channel_order().len()
    }

    /// Whether the format stores per-pixel alpha.
    pub fn has_alpha(&self) -> bool {
        self.channel_bits()[3] != 0
    }

    /// Whether stored color channels are premultiplied by alpha.
    ///
    /// All stored formats are straight alpha; premultiplication happens on
    /// conversion to [`Rgba64`].
    pub fn is_premultiplied(&self) -> bool {
        false
    }

    /// The all-zero value of this format.
    pub fn zero(&self) -> Color {
        match self {
            Self::Gray8 => Gray8::default().into(),
            Self::GrayAlpha8 => GrayAlpha8::default().into(),
            Self::R8 => R8::default().into(),
            Self::Rgb8 => Rgb8::default().into(),
            Self::Rgb565 => Rgb565::default().into(),
            Self::Rgba4444 => Rgba4444::default().into(),
            Self::Rgba5551 => Rgba5551::default().into(),
            Self::Bgra8888 => Bgra8888::default().into(),
            Self::Rgba64 => Rgba64::default().into(),
        }
    }

    /// Convert `c` into this format.
    ///
    /// A color already stored in this format is returned unchanged.
    pub fn convert(&self, c: Color) -> Color {
        if c.format() == *self {
            return c;
        }
        let canonical = c.to_rgba64();
        match self {
            Self::Gray8 => Gray8::from_rgba64(canonical).into(),
            Self::GrayAlpha8 => GrayAlpha8::from_rgba64(canonical).into(),
            Self::R8 => R8::from_rgba64(canonical).into(),
            Self::Rgb8 => Rgb8::from_rgba64(canonical).into(),
            Self::Rgb565 => Rgb565::from_rgba64(canonical).into(),
            Self::Rgba4444 => Rgba4444::from_rgba64(canonical).into(),
            Self::Rgba5551 => Rgba5551::from_rgba64(canonical).into(),
            Self::Bgra8888 => Bgra8888::from_rgba64(canonical).into(),
            Self::Rgba64 => canonical.into(),
        }
    }

    /// Read one pixel. `bytes` must hold at least `bytes_per_pixel()` bytes.
    pub(crate) fn read(&self, bytes: &[u8]) -> Color {
        let u16_at = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]);
        match self {
            Self::Gray8 => Gray8 { y: bytes[0] }.into(),
            Self::GrayAlpha8 => GrayAlpha8 {
                y: bytes[0],
                a: bytes[1],
            }
            .into(),
            Self::R8 => R8 { r: bytes[0] }.into(),
            Self::Rgb8 => Rgb8::new(bytes[0], bytes[1], bytes[2]).into(),
            Self::Rgb565 => Rgb565(u16_at(0)).into(),
            Self::Rgba4444 => Rgba4444(u16_at(0)).into(),
            Self::Rgba5551 => Rgba5551(u16_at(0)).into(),
            Self::Bgra8888 => Bgra8888 {
                b: bytes[0],
                g: bytes[1],
                r: bytes[2],
                a: bytes[3],
            }
            .into(),
            Self::Rgba64 => Rgba64::new(u16_at(0), u16_at(2), u16_at(4), u16_at(6)).into(),
        }
    }
}

impl Color {
    /// Write this value in its own format. `out` must hold at least
    /// `self.format().bytes_per_pixel()` bytes.
    pub(crate) fn write(&self, out: &mut [u8]) {
        match *self {
            Color::Gray8(c) => out[0] = c.y,
            Color::GrayAlpha8(c) => out[..2].copy_from_slice(&[c.y, c.a]),
            Color::R8(c) => out[0] = c.r,
            Color::Rgb8(c) => out[..3].copy_from_slice(&[c.r, c.g, c.b]),
            Color::Rgb565(c) => out[..2].copy_from_slice(&c.0.to_le_bytes()),
            Color::Rgba4444(c) => out[..2].copy_from_slice(&c.0.to_le_bytes()),
            Color::Rgba5551(c) => out[..2].copy_from_slice(&c.0.to_le_bytes()),
            Color::Bgra8888(c) => out[..4].copy_from_slice(&[c.b, c.g, c.r, c.a]),
            Color::Rgba64(c) => {
                out[0..2].copy_from_slice(&c.r.to_le_bytes());
                out[2..4].copy_from_slice(&c.g.to_le_bytes());
                out[4..6].copy_from_slice(&c.b.to_le_bytes());
                out[6..8].copy_from_slice(&c.a.to_le_bytes());
            }
        }
    }
}
