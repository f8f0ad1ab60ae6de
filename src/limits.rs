use crate::error::KtxError;
use crate::image::Rect;
use crate::pixel::PixelFormat;

/// Resource limits for decoding and materializing textures.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes of pixel data the decoder wraps or allocates.
    ///
    /// Applies to the texture payload at decode time and again to every
    /// buffer built from it: ETC1 decompression, format conversion and
    /// `imgref` output.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check dimensions against limits.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), KtxError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(KtxError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(KtxError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(KtxError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check that a payload or allocation size is within memory limits.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), KtxError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes as u64 > max_mem {
                return Err(KtxError::LimitExceeded(alloc::format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }

    /// Check a tightly packed `format` buffer covering `rect` before it is
    /// allocated.
    pub(crate) fn check_buffer(&self, rect: Rect, format: PixelFormat) -> Result<(), KtxError> {
        let (width, height) = (rect.width(), rect.height());
        self.check(width, height)?;
        let bytes = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(format.bytes_per_pixel()))
            .ok_or(KtxError::DimensionsTooLarge { width, height })?;
        self.check_memory(bytes)
    }
}

/// Apply `limits`, when present, to a buffer about to be allocated.
pub(crate) fn check_buffer(
    limits: Option<&Limits>,
    rect: Rect,
    format: PixelFormat,
) -> Result<(), KtxError> {
    match limits {
        Some(limits) => limits.check_buffer(rect, format),
        None => Ok(()),
    }
}
