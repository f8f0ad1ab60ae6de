use alloc::borrow::Cow;

use enough::Stop;

use crate::color::Color;
use crate::error::KtxError;
use crate::etc1::{BlockCompressedImage, Etc1Image};
use crate::image::{Image, PlanarImage, Rect};
use crate::info::{ImageInfo, TextureFormat};
use crate::ktx::{KeyValues, KtxHeader};
use crate::limits::Limits;
use crate::pixel::PixelFormat;

/// Decoded texture: a planar pixel buffer or ETC1 blocks.
#[derive(Clone, Debug)]
pub enum KtxImage<'a> {
    Planar(PlanarImage<'a>),
    Etc1(Etc1Image<'a>),
}

impl<'a> KtxImage<'a> {
    pub fn as_planar(&self) -> Option<&PlanarImage<'a>> {
        match self {
            Self::Planar(m) => Some(m),
            Self::Etc1(_) => None,
        }
    }

    /// Mutable planar access, for [`PlanarImage::set_pixel`].
    pub fn as_planar_mut(&mut self) -> Option<&mut PlanarImage<'a>> {
        match self {
            Self::Planar(m) => Some(m),
            Self::Etc1(_) => None,
        }
    }

    pub fn as_etc1(&self) -> Option<&Etc1Image<'a>> {
        match self {
            Self::Etc1(m) => Some(m),
            Self::Planar(_) => None,
        }
    }

    /// Whether the data is borrowed (zero-copy from input).
    pub fn is_borrowed(&self) -> bool {
        match self {
            Self::Planar(m) => m.is_borrowed(),
            Self::Etc1(m) => m.is_borrowed(),
        }
    }

    /// Take ownership of the data (copies if borrowed).
    pub fn into_owned(self) -> KtxImage<'static> {
        match self {
            Self::Planar(m) => KtxImage::Planar(m.into_owned()),
            Self::Etc1(m) => KtxImage::Etc1(m.into_owned()),
        }
    }

    /// Planar rendition of the texture. ETC1 blocks are decompressed;
    /// planar data is copied. `limits` apply to the new buffer.
    pub fn to_planar(
        &self,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<PlanarImage<'static>, KtxError> {
        match self {
            Self::Planar(m) => {
                if let Some(limits) = limits {
                    limits.check_memory(m.pixels().len())?;
                }
                Ok(m.clone().into_owned())
            }
            Self::Etc1(m) => m.decompress(limits, stop),
        }
    }
}

impl Image for KtxImage<'_> {
    fn bounds(&self) -> Rect {
        match self {
            Self::Planar(m) => m.bounds(),
            Self::Etc1(m) => m.bounds(),
        }
    }

    fn color_model(&self) -> PixelFormat {
        match self {
            Self::Planar(m) => m.color_model(),
            Self::Etc1(m) => m.color_model(),
        }
    }

    fn pixel_at(&self, x: i32, y: i32) -> Color {
        match self {
            Self::Planar(m) => m.pixel_at(x, y),
            Self::Etc1(m) => m.pixel_at(x, y),
        }
    }
}

/// Decoded KTX output. Pixel data may be borrowed (zero-copy) or owned.
#[derive(Clone, Debug)]
pub struct DecodeOutput<'a> {
    image: KtxImage<'a>,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    header: KtxHeader,
    key_value_data: Cow<'a, [u8]>,
    limits: Option<Limits>,
}

impl<'a> DecodeOutput<'a> {
    pub(crate) fn new(
        image: KtxImage<'a>,
        width: u32,
        height: u32,
        format: TextureFormat,
        header: KtxHeader,
        key_value_data: Cow<'a, [u8]>,
        limits: Option<Limits>,
    ) -> Self {
        Self {
            image,
            width,
            height,
            format,
            header,
            key_value_data,
            limits,
        }
    }

    pub fn image(&self) -> &KtxImage<'a> {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut KtxImage<'a> {
        &mut self.image
    }

    pub fn into_image(self) -> KtxImage<'a> {
        self.image
    }

    pub fn header(&self) -> &KtxHeader {
        &self.header
    }

    /// Key/value metadata stored ahead of the image data.
    pub fn key_values(&self) -> KeyValues<'_> {
        KeyValues::new(&self.key_value_data, self.header.endian)
    }

    /// Whether the pixel data is borrowed (zero-copy from input).
    pub fn is_borrowed(&self) -> bool {
        self.image.is_borrowed()
    }

    /// Take ownership of the pixel data (copies if borrowed).
    pub fn into_owned(self) -> DecodeOutput<'static> {
        DecodeOutput {
            image: self.image.into_owned(),
            width: self.width,
            height: self.height,
            format: self.format,
            header: self.header,
            key_value_data: Cow::Owned(self.key_value_data.into_owned()),
            limits: self.limits,
        }
    }

    /// Planar rendition of the texture, under the limits it was decoded with.
    pub fn to_planar(&self, stop: &dyn Stop) -> Result<PlanarImage<'static>, KtxError> {
        self.image.to_planar(self.limits.as_ref(), stop)
    }

    /// Convert to an [`imgref::ImgVec`] of canonical 16-bit RGBA pixels,
    /// under the limits the texture was decoded with.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> Result<imgref::ImgVec<rgb::Rgba<u16>>, KtxError> {
        crate::image::to_imgvec(&self.image, self.limits.as_ref())
    }
}

impl Image for DecodeOutput<'_> {
    fn bounds(&self) -> Rect {
        self.image.bounds()
    }

    fn color_model(&self) -> PixelFormat {
        self.image.color_model()
    }

    fn pixel_at(&self, x: i32, y: i32) -> Color {
        self.image.pixel_at(x, y)
    }
}

/// Builder for KTX decode operations.
///
/// ```no_run
/// use zenktx::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your KTX bytes
/// let limits = Limits {
///     max_pixels: Some(4096 * 4096),
///     ..Default::default()
/// };
/// let decoded = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// println!("{}x{} {:?}", decoded.width, decoded.height, decoded.format);
/// # Ok::<(), zenktx::KtxError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode the first image.
    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput<'a>, KtxError> {
        crate::ktx::decode(self.data, self.limits, &stop)
    }

    /// Parse the header only. Limits on dimensions still apply.
    pub fn decode_config(self) -> Result<ImageInfo, KtxError> {
        let info = ImageInfo::from_bytes(self.data)?;
        if let Some(limits) = self.limits {
            limits.check(info.width, info.height)?;
        }
        Ok(info)
    }
}
