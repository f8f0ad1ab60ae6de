use crate::error::KtxError;
use crate::etc1;
use crate::ktx::KtxHeader;
use crate::pixel::PixelFormat;

/// Storage of the first image in a KTX file.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// Uncompressed pixels in a packed format.
    Packed(PixelFormat),
    /// ETC1 blocks, decoding to [`PixelFormat::Rgb8`].
    Etc1,
}

impl TextureFormat {
    /// Format of every pixel read from a texture of this kind.
    pub fn color_model(&self) -> PixelFormat {
        match self {
            Self::Packed(format) => *format,
            Self::Etc1 => PixelFormat::Rgb8,
        }
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, Self::Etc1)
    }

    /// Payload bytes for a `width`×`height` image with tightly packed rows.
    pub fn payload_len(&self, width: u32, height: u32) -> Option<usize> {
        match self {
            Self::Packed(format) => (width as usize)
                .checked_mul(height as usize)?
                .checked_mul(format.bytes_per_pixel()),
            Self::Etc1 => etc1::encoded_size(width, height),
        }
    }
}

/// Image metadata from header parsing (no pixel decoding).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub header: KtxHeader,
}

impl ImageInfo {
    /// Parse the header and validate the format combination.
    ///
    /// Never reads past the fixed header, so a file cut off after it still
    /// probes successfully.
    pub fn from_bytes(data: &[u8]) -> Result<Self, KtxError> {
        crate::ktx::probe(data)
    }

    pub fn color_model(&self) -> PixelFormat {
        self.format.color_model()
    }
}
