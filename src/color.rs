//! Packed GL pixel types and the canonical 16-bit color they convert through.
//!
//! Every packed type decodes to [`Rgba64`] with exact integer arithmetic.
//! Formats that carry an independent alpha channel (gray+alpha, 4-4-4-4,
//! BGRA 8-8-8-8) store non-premultiplied values and decode to premultiplied
//! canonical channels; encoding un-premultiplies again.

use crate::pixel::PixelFormat;

/// Canonical 16-bit-per-channel RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba64 {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Rgba64 {
    pub const TRANSPARENT: Rgba64 = Rgba64::new(0, 0, 0, 0);
    pub const OPAQUE_WHITE: Rgba64 = Rgba64::new(0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF);

    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }
}

/// A pixel type with a fixed bit layout, convertible to and from [`Rgba64`].
///
/// `Default` is the all-zero packed value.
pub trait PackedPixel: Copy + Default + Into<Color> {
    /// Format descriptor for this pixel type.
    const FORMAT: PixelFormat;

    /// Decode to the canonical color.
    fn to_rgba64(self) -> Rgba64;

    /// Encode a canonical color.
    fn from_rgba64(c: Rgba64) -> Self;
}

// ── Arithmetic helpers ──────────────────────────────────────────────

/// `c * 0xFFFF / a`; `a` must be non-zero.
#[inline]
fn unpremultiply(c: u16, a: u16) -> u32 {
    u32::from(c) * 0xFFFF / u32::from(a)
}

/// Scale a 16-bit channel down to `0..=max`, rounding to nearest.
#[inline]
fn downscale(v: u16, max: u32) -> u16 {
    ((u32::from(v) * max + 0x7FFF) / 0xFFFF) as u16
}

/// Scale a `0..=max` field up to 16 bits.
#[inline]
fn upscale(v: u16, max: u32) -> u16 {
    (u32::from(v) * 0xFFFF / max) as u16
}

/// `v * 0x101 * a / 0xFF`: an 8-bit channel premultiplied by an 8-bit alpha.
#[inline]
fn premultiply8(v: u8, a: u8) -> u16 {
    (u32::from(v) * 0x101 * u32::from(a) / 0xFF) as u16
}

// ── Gray8 ───────────────────────────────────────────────────────────

/// 8-bit opaque grayscale (`GL_LUMINANCE`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Gray8 {
    pub y: u8,
}

impl PackedPixel for Gray8 {
    const FORMAT: PixelFormat = PixelFormat::Gray8;

    fn to_rgba64(self) -> Rgba64 {
        let y = u16::from(self.y) * 0x101;
        Rgba64::new(y, y, y, 0xFFFF)
    }

    fn from_rgba64(c: Rgba64) -> Self {
        // Rec. 601 luma, weights sum to 1 << 16.
        let y = (19595 * u32::from(c.r) + 38470 * u32::from(c.g) + 7471 * u32::from(c.b) + 0x8000)
            >> 24;
        Gray8 { y: y as u8 }
    }
}

// ── GrayAlpha8 ──────────────────────────────────────────────────────

/// Non-premultiplied 8-bit gray plus 8-bit alpha (`GL_LUMINANCE_ALPHA`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GrayAlpha8 {
    pub y: u8,
    pub a: u8,
}

impl PackedPixel for GrayAlpha8 {
    const FORMAT: PixelFormat = PixelFormat::GrayAlpha8;

    fn to_rgba64(self) -> Rgba64 {
        let y = premultiply8(self.y, self.a);
        Rgba64::new(y, y, y, u16::from(self.a) * 0x101)
    }

    fn from_rgba64(c: Rgba64) -> Self {
        match c.a {
            0xFFFF => GrayAlpha8 {
                y: (c.r >> 8) as u8,
                a: 0xFF,
            },
            0 => GrayAlpha8::default(),
            a => GrayAlpha8 {
                y: (unpremultiply(c.r, a) >> 8) as u8,
                a: a as u8,
            },
        }
    }
}

// ── R8 ──────────────────────────────────────────────────────────────

/// Opaque color with only an 8-bit red channel (`GL_RED`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct R8 {
    pub r: u8,
}

impl PackedPixel for R8 {
    const FORMAT: PixelFormat = PixelFormat::R8;

    fn to_rgba64(self) -> Rgba64 {
        Rgba64::new(u16::from(self.r) * 0x101, 0, 0, 0xFFFF)
    }

    fn from_rgba64(c: Rgba64) -> Self {
        R8 {
            r: (c.r >> 8) as u8,
        }
    }
}

// ── Rgb8 ────────────────────────────────────────────────────────────

/// Opaque 8-bit-per-channel RGB. Also the output of the ETC1 codec.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl PackedPixel for Rgb8 {
    const FORMAT: PixelFormat = PixelFormat::Rgb8;

    fn to_rgba64(self) -> Rgba64 {
        Rgba64::new(
            u16::from(self.r) * 0x101,
            u16::from(self.g) * 0x101,
            u16::from(self.b) * 0x101,
            0xFFFF,
        )
    }

    fn from_rgba64(c: Rgba64) -> Self {
        Rgb8::new((c.r >> 8) as u8, (c.g >> 8) as u8, (c.b >> 8) as u8)
    }
}

// ── Rgb565 ──────────────────────────────────────────────────────────

/// Opaque 16-bit RGB: red in bits 15..11, green 10..5, blue 4..0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb565(pub u16);

impl PackedPixel for Rgb565 {
    const FORMAT: PixelFormat = PixelFormat::Rgb565;

    fn to_rgba64(self) -> Rgba64 {
        let v = self.0;
        Rgba64::new(
            upscale((v >> 11) & 0x1F, 0x1F),
            upscale((v >> 5) & 0x3F, 0x3F),
            upscale(v & 0x1F, 0x1F),
            0xFFFF,
        )
    }

    fn from_rgba64(c: Rgba64) -> Self {
        let r = downscale(c.r, 0x1F);
        let g = downscale(c.g, 0x3F);
        let b = downscale(c.b, 0x1F);
        Rgb565((r << 11) | (g << 5) | b)
    }
}

// ── Rgba4444 ────────────────────────────────────────────────────────

/// Non-premultiplied 16-bit RGBA, one nibble per channel, red in the top nibble.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba4444(pub u16);

impl PackedPixel for Rgba4444 {
    const FORMAT: PixelFormat = PixelFormat::Rgba4444;

    fn to_rgba64(self) -> Rgba64 {
        let v = u32::from(self.0);
        let a4 = v & 0xF;
        let channel = |shift: u32| (((v >> shift) & 0xF) * 0x1111 * a4 / 0xF) as u16;
        Rgba64::new(channel(12), channel(8), channel(4), (a4 * 0x1111) as u16)
    }

    fn from_rgba64(c: Rgba64) -> Self {
        let (r, g, b, a) = match c.a {
            0xFFFF => (
                u32::from(c.r) >> 12,
                u32::from(c.g) >> 12,
                u32::from(c.b) >> 12,
                0xF,
            ),
            0 => return Rgba4444(0),
            a => (
                (unpremultiply(c.r, a) >> 12) & 0xF,
                (unpremultiply(c.g, a) >> 12) & 0xF,
                (unpremultiply(c.b, a) >> 12) & 0xF,
                u32::from(a) & 0xF,
            ),
        };
        Rgba4444(((r << 12) | (g << 8) | (b << 4) | a) as u16)
    }
}

// ── Rgba5551 ────────────────────────────────────────────────────────

/// 16-bit RGBA with 5 bits per color channel and a 1-bit alpha in bit 0.
///
/// A clear alpha bit decodes to transparent black whatever the color bits hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba5551(pub u16);

impl PackedPixel for Rgba5551 {
    const FORMAT: PixelFormat = PixelFormat::Rgba5551;

    fn to_rgba64(self) -> Rgba64 {
        let v = self.0;
        if v & 0x1 == 0 {
            return Rgba64::TRANSPARENT;
        }
        Rgba64::new(
            upscale((v >> 11) & 0x1F, 0x1F),
            upscale((v >> 6) & 0x1F, 0x1F),
            upscale((v >> 1) & 0x1F, 0x1F),
            0xFFFF,
        )
    }

    fn from_rgba64(c: Rgba64) -> Self {
        let r = downscale(c.r, 0x1F);
        let g = downscale(c.g, 0x1F);
        let b = downscale(c.b, 0x1F);
        Rgba5551((r << 11) | (g << 6) | (b << 1) | (c.a & 0x1))
    }
}

// ── Bgra8888 ────────────────────────────────────────────────────────

/// Non-premultiplied 8-bit-per-channel color stored in B, G, R, A byte order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bgra8888 {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl PackedPixel for Bgra8888 {
    const FORMAT: PixelFormat = PixelFormat::Bgra8888;

    fn to_rgba64(self) -> Rgba64 {
        Rgba64::new(
            premultiply8(self.r, self.a),
            premultiply8(self.g, self.a),
            premultiply8(self.b, self.a),
            u16::from(self.a) * 0x101,
        )
    }

    fn from_rgba64(c: Rgba64) -> Self {
        match c.a {
            0xFFFF => Bgra8888 {
                b: (c.b >> 8) as u8,
                g: (c.g >> 8) as u8,
                r: (c.r >> 8) as u8,
                a: 0xFF,
            },
            0 => Bgra8888::default(),
            a => Bgra8888 {
                b: (unpremultiply(c.b, a) >> 8) as u8,
                g: (unpremultiply(c.g, a) >> 8) as u8,
                r: (unpremultiply(c.r, a) >> 8) as u8,
                a: a as u8,
            },
        }
    }
}

impl PackedPixel for Rgba64 {
    const FORMAT: PixelFormat = PixelFormat::Rgba64;

    fn to_rgba64(self) -> Rgba64 {
        self
    }

    fn from_rgba64(c: Rgba64) -> Self {
        c
    }
}

// ── Tagged color ────────────────────────────────────────────────────

/// A color value tagged with the pixel format it is stored in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Color {
    Gray8(Gray8),
    GrayAlpha8(GrayAlpha8),
    R8(R8),
    Rgb8(Rgb8),
    Rgb565(Rgb565),
    Rgba4444(Rgba4444),
    Rgba5551(Rgba5551),
    Bgra8888(Bgra8888),
    Rgba64(Rgba64),
}

impl Color {
    /// Decode to the canonical color.
    pub fn to_rgba64(self) -> Rgba64 {
        match self {
            Color::Gray8(c) => c.to_rgba64(),
            Color::GrayAlpha8(c) => c.to_rgba64(),
            Color::R8(c) => c.to_rgba64(),
            Color::Rgb8(c) => c.to_rgba64(),
            Color::Rgb565(c) => c.to_rgba64(),
            Color::Rgba4444(c) => c.to_rgba64(),
            Color::Rgba5551(c) => c.to_rgba64(),
            Color::Bgra8888(c) => c.to_rgba64(),
            Color::Rgba64(c) => c,
        }
    }

    /// The format this value is stored in.
    pub fn format(&self) -> PixelFormat {
        match self {
            Color::Gray8(_) => PixelFormat::Gray8,
            Color::GrayAlpha8(_) => PixelFormat::GrayAlpha8,
            Color::R8(_) => PixelFormat::R8,
            Color::Rgb8(_) => PixelFormat::Rgb8,
            Color::Rgb565(_) => PixelFormat::Rgb565,
            Color::Rgba4444(_) => PixelFormat::Rgba4444,
            Color::Rgba5551(_) => PixelFormat::Rgba5551,
            Color::Bgra8888(_) => PixelFormat::Bgra8888,
            Color::Rgba64(_) => PixelFormat::Rgba64,
        }
    }

    /// Extract a specific pixel type, or `None` if this color is stored in another format.
    pub fn as_packed<P: PackedPixel>(self) -> Option<P>
    where
        P: TryFrom<Color>,
    {
        P::try_from(self).ok()
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::Rgba64(Rgba64::TRANSPARENT)
    }
}

macro_rules! impl_color_variant {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Color {
                fn from(c: $ty) -> Self {
                    Color::$ty(c)
                }
            }

            impl TryFrom<Color> for $ty {
                type Error = PixelFormat;

                /// Fails with the actual format when `c` holds another variant.
                fn try_from(c: Color) -> Result<Self, PixelFormat> {
                    match c {
                        Color::$ty(v) => Ok(v),
                        other => Err(other.format()),
                    }
                }
            }
        )*
    };
}

impl_color_variant!(
    Gray8, GrayAlpha8, R8, Rgb8, Rgb565, Rgba4444, Rgba5551, Bgra8888, Rgba64,
);

// ── rgb crate interop ───────────────────────────────────────────────

#[cfg(feature = "rgb")]
impl From<Rgba64> for rgb::Rgba<u16> {
    fn from(c: Rgba64) -> Self {
        rgb::Rgba {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::Rgba<u16>> for Rgba64 {
    fn from(c: rgb::Rgba<u16>) -> Self {
        Rgba64::new(c.r, c.g, c.b, c.a)
    }
}

#[cfg(feature = "rgb")]
impl From<Rgb8> for rgb::Rgb<u8> {
    fn from(c: Rgb8) -> Self {
        rgb::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(c: impl PackedPixel) -> (u16, u16, u16, u16) {
        let c = c.to_rgba64();
        (c.r, c.g, c.b, c.a)
    }

    #[test]
    fn gray_alpha() {
        assert_eq!(rgba(GrayAlpha8::default()), (0, 0, 0, 0));
        assert_eq!(
            rgba(GrayAlpha8 { y: 0x55, a: 0xAA }),
            (0x38E3, 0x38E3, 0x38E3, 0xAAAA)
        );
        let c = GrayAlpha8::from_rgba64(Rgba64::new(0x38E3, 0x38E3, 0x38E3, 0xAAAA));
        assert_eq!(c, GrayAlpha8 { y: 0x55, a: 0xAA });
    }

    #[test]
    fn red_only() {
        assert_eq!(rgba(R8::default()), (0, 0, 0, 0xFFFF));
        assert_eq!(rgba(R8 { r: 0x55 }), (0x5555, 0, 0, 0xFFFF));
        let c = R8::from_rgba64(Rgba64::new(0x5151, 0x5151, 0x5151, 0xFFFF));
        assert_eq!(c, R8 { r: 0x51 });
    }

    #[test]
    fn rgb8() {
        assert_eq!(rgba(Rgb8::default()), (0, 0, 0, 0xFFFF));
        assert_eq!(
            rgba(Rgb8::new(0x5F, 0x2E, 0x3C)),
            (0x5F5F, 0x2E2E, 0x3C3C, 0xFFFF)
        );
        let c = Rgb8::from_rgba64(Rgba64::new(0x5151, 0xB6B6, 0x5151, 0xFFFF));
        assert_eq!(c, Rgb8::new(0x51, 0xB6, 0x51));
    }

    #[test]
    fn gray8_luma() {
        assert_eq!(Gray8::from_rgba64(Rgba64::OPAQUE_WHITE), Gray8 { y: 0xFF });
        assert_eq!(Gray8::from_rgba64(Rgba64::TRANSPARENT), Gray8 { y: 0 });
        for y in [0u8, 1, 0x5A, 0xA5, 0xFE, 0xFF] {
            assert_eq!(Gray8::from_rgba64(Gray8 { y }.to_rgba64()), Gray8 { y });
        }
    }

    #[test]
    fn rgb565() {
        assert_eq!(rgba(Rgb565::default()), (0, 0, 0, 0xFFFF));
        assert_eq!(rgba(Rgb565(0x55AA)), (0x5294, 0xB6DA, 0x5294, 0xFFFF));
        // Nearest rounding: 0x5151 → 9.84 → 10, 0xB6B6 → 44.96 → 45.
        let c = Rgb565::from_rgba64(Rgba64::new(0x5151, 0xB6B6, 0x5151, 0xFFFF));
        assert_eq!(c, Rgb565(0x55AA));
    }

    #[test]
    fn rgba4444() {
        assert_eq!(rgba(Rgba4444::default()), (0, 0, 0, 0));
        assert_eq!(rgba(Rgba4444(0x55AA)), (0x38E3, 0x38E3, 0x71C6, 0xAAAA));
        let c = Rgba4444::from_rgba64(Rgba64::new(0x38E3, 0x38E3, 0x71C6, 0xAAAA));
        assert_eq!(c, Rgba4444(0x55AA));
    }

    #[test]
    fn rgba5551() {
        assert_eq!(rgba(Rgba5551::default()), (0, 0, 0, 0));
        assert_eq!(rgba(Rgba5551(0x55AB)), (0x5294, 0xB5AC, 0xAD6A, 0xFFFF));
        // Alpha bit clear collapses the color.
        assert_eq!(rgba(Rgba5551(0x55AA)), (0, 0, 0, 0));
        let c = Rgba5551::from_rgba64(Rgba64::new(0x5555, 0xAAAA, 0x5555, 0xFFFF));
        assert_eq!(c, Rgba5551(0x5555));
    }

    #[test]
    fn bgra8888() {
        assert_eq!(rgba(Bgra8888::default()), (0, 0, 0, 0));
        let c = Bgra8888 {
            b: 0x11,
            g: 0x22,
            r: 0x33,
            a: 0x44,
        };
        assert_eq!(rgba(c), (0x0DA7, 0x091A, 0x048D, 0x4444));
        let back = Bgra8888::from_rgba64(Rgba64::new(0x0DA7, 0x091A, 0x048D, 0x4444));
        assert_eq!(back, c);
    }

    #[test]
    fn zero_alpha_encodes_to_zero() {
        let c = Rgba64::new(0x1234, 0x5678, 0x9ABC, 0);
        assert_eq!(Rgba4444::from_rgba64(c), Rgba4444(0));
        assert_eq!(Bgra8888::from_rgba64(c), Bgra8888::default());
        assert_eq!(GrayAlpha8::from_rgba64(c), GrayAlpha8::default());
    }

    #[test]
    fn full_alpha_truncates_high_bits() {
        let c = Rgba64::new(0x1234, 0x5678, 0x9ABC, 0xFFFF);
        assert_eq!(Rgba4444::from_rgba64(c), Rgba4444(0x159F));
        assert_eq!(
            Bgra8888::from_rgba64(c),
            Bgra8888 {
                b: 0x9A,
                g: 0x56,
                r: 0x12,
                a: 0xFF
            }
        );
        assert_eq!(
            GrayAlpha8::from_rgba64(c),
            GrayAlpha8 { y: 0x12, a: 0xFF }
        );
    }

    #[test]
    fn lossless_16bit_roundtrips() {
        for v in 0..=u16::MAX {
            assert_eq!(Rgb565::from_rgba64(Rgb565(v).to_rgba64()), Rgb565(v));
            if v & 0x1 == 1 {
                assert_eq!(Rgba5551::from_rgba64(Rgba5551(v).to_rgba64()), Rgba5551(v));
            }
            // A zero alpha nibble collapses to the zero value.
            let back = Rgba4444::from_rgba64(Rgba4444(v).to_rgba64());
            if v & 0xF == 0 {
                assert_eq!(back, Rgba4444(0));
            } else {
                assert_eq!(back, Rgba4444(v), "value 0x{v:04X}");
            }
        }
    }

    #[test]
    fn opaque_8bit_roundtrips() {
        for v in 0..=u8::MAX {
            let c = Bgra8888 {
                b: v,
                g: v.wrapping_add(85),
                r: v.wrapping_mul(3),
                a: 0xFF,
            };
            assert_eq!(Bgra8888::from_rgba64(c.to_rgba64()), c);
            let ga = GrayAlpha8 { y: v, a: 0xFF };
            assert_eq!(GrayAlpha8::from_rgba64(ga.to_rgba64()), ga);
            assert_eq!(R8::from_rgba64(R8 { r: v }.to_rgba64()), R8 { r: v });
        }
    }

    /// Per-channel distance between `c` and its trip through `P`.
    fn trip_error<P: PackedPixel>(c: Rgba64) -> [u16; 4] {
        let back = P::from_rgba64(c).to_rgba64();
        [
            back.r.abs_diff(c.r),
            back.g.abs_diff(c.g),
            back.b.abs_diff(c.b),
            back.a.abs_diff(c.a),
        ]
    }

    fn assert_within<P: PackedPixel>(c: Rgba64, step: [u16; 4]) {
        let err = trip_error::<P>(c);
        for (e, s) in err.iter().zip(step) {
            assert!(*e <= s, "{:?} {c:?}: error {err:?} over {step:?}", P::FORMAT);
        }
    }

    #[test]
    fn lossy_error_within_one_step() {
        // Opaque colors survive every format within one quantization step.
        const STEP4: u16 = 0xFFFF / 0xF;
        const STEP5: u16 = 0xFFFF / 0x1F;
        const STEP6: u16 = 0xFFFF / 0x3F;
        const STEP8: u16 = 0xFFFF / 0xFF;
        for v in 0..=u16::MAX {
            let c = Rgba64::new(v, v.wrapping_mul(7), !v, 0xFFFF);
            assert_within::<Rgb565>(c, [STEP5, STEP6, STEP5, 0]);
            assert_within::<Rgba5551>(c, [STEP5, STEP5, STEP5, 0]);
            assert_within::<Rgba4444>(c, [STEP4, STEP4, STEP4, 0]);
            assert_within::<Bgra8888>(c, [STEP8, STEP8, STEP8, 0]);
            assert_within::<Rgb8>(c, [STEP8, STEP8, STEP8, 0]);
            // R8 keeps red only.
            assert_within::<R8>(c, [STEP8, u16::MAX, u16::MAX, 0]);
            // Gray formats need neutral input to be comparable.
            let gray = Rgba64::new(v, v, v, 0xFFFF);
            assert_within::<Gray8>(gray, [STEP8, STEP8, STEP8, 0]);
            assert_within::<GrayAlpha8>(gray, [STEP8, STEP8, STEP8, 0]);
        }
    }

    #[test]
    fn partial_alpha_is_not_stable() {
        // Encoding divides the premultiplied channel back out with integer
        // math and keeps the low alpha byte, so faint colors can drop a step.
        let c = GrayAlpha8 { y: 1, a: 1 }.to_rgba64();
        assert_eq!((c.r, c.a), (1, 0x0101));
        assert_eq!(GrayAlpha8::from_rgba64(c), GrayAlpha8 { y: 0, a: 1 });

        let c = Bgra8888 {
            b: 1,
            g: 1,
            r: 1,
            a: 1,
        };
        assert_eq!(
            Bgra8888::from_rgba64(c.to_rgba64()),
            Bgra8888 {
                b: 0,
                g: 0,
                r: 0,
                a: 1
            }
        );

        // Full alpha is exact.
        let c = GrayAlpha8 { y: 1, a: 0xFF };
        assert_eq!(GrayAlpha8::from_rgba64(c.to_rgba64()), c);
    }

    #[test]
    fn tagged_color_conversions() {
        let c: Color = Rgb565(0x1234).into();
        assert_eq!(c.format(), PixelFormat::Rgb565);
        assert_eq!(c.as_packed::<Rgb565>(), Some(Rgb565(0x1234)));
        assert_eq!(c.as_packed::<Rgba4444>(), None);
        assert_eq!(
            Rgba4444::try_from(c),
            Err(PixelFormat::Rgb565),
            "wrong variant reports the actual format"
        );
    }
}
