use alloc::string::String;
use enough::StopReason;

/// Errors from KTX parsing and texture decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum KtxError {
    #[error("invalid KTX identifier")]
    InvalidSignature,

    #[error("invalid endianness marker {0:02X?}")]
    InvalidEndianness([u8; 4]),

    #[error(
        "unsupported type-format combination: glType=0x{gl_type:X} glFormat=0x{gl_format:X} glInternalFormat=0x{gl_internal_format:X}"
    )]
    UnsupportedFormatCombination {
        gl_type: u32,
        gl_format: u32,
        gl_internal_format: u32,
    },

    #[error("truncated input: need {needed} bytes, got {actual}")]
    TruncatedInput { needed: usize, actual: usize },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StopReason> for KtxError {
    fn from(r: StopReason) -> Self {
        KtxError::Cancelled(r)
    }
}
