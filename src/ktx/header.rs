//! KTX 1.1 header and key/value data.
//!
//! ```plain
//! offset  size  field
//!      0    12  identifier  AB 4B 54 58 20 31 31 BB 0D 0A 1A 0A
//!     12     4  endianness  0x04030201 in the writer's byte order
//!     16    48  glType, glTypeSize, glFormat, glInternalFormat,
//!               glBaseInternalFormat, pixelWidth, pixelHeight, pixelDepth,
//!               numberOfArrayElements, numberOfFaces, numberOfMipmapLevels,
//!               bytesOfKeyValueData
//!     64     n  key/value pairs
//!   64+n     4  imageSize of mip level 0, then its pixel data
//! ```

use crate::error::KtxError;

use super::gl::{FormatName, TypeName};

/// KTX file identifier.
pub const MAGIC: [u8; 12] = [
    0xAB, 0x4B, 0x54, 0x58, 0x20, 0x31, 0x31, 0xBB, 0x0D, 0x0A, 0x1A, 0x0A,
];

/// Size of the fixed header, up to the key/value data.
pub const HEADER_LEN: usize = 64;

const ENDIAN_LITTLE: u32 = 0x0403_0201;
const ENDIAN_BIG: u32 = 0x0102_0304;

/// Byte order of every 32-bit header field, and of 16-bit pixel words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    /// Decide byte order from the 4-byte marker.
    pub fn from_marker(marker: [u8; 4]) -> Result<Self, KtxError> {
        match u32::from_le_bytes(marker) {
            ENDIAN_LITTLE => Ok(Endian::Little),
            ENDIAN_BIG => Ok(Endian::Big),
            _ => Err(KtxError::InvalidEndianness(marker)),
        }
    }

    #[inline]
    pub fn u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Endian::Little => u32::from_le_bytes(bytes),
            Endian::Big => u32::from_be_bytes(bytes),
        }
    }
}

// ── Cursor for reading from &[u8] ───────────────────────────────────

#[derive(Clone, Debug)]
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn at(data: &'a [u8], pos: usize) -> Result<Self, KtxError> {
        let mut c = Self::new(data);
        c.skip(pos)?;
        Ok(c)
    }

    fn truncated(&self, n: usize) -> KtxError {
        KtxError::TruncatedInput {
            needed: self.pos.saturating_add(n),
            actual: self.data.len(),
        }
    }

    pub(crate) fn skip(&mut self, n: usize) -> Result<(), KtxError> {
        self.take(n).map(|_| ())
    }

    pub(crate) fn take(&mut self, n: usize) -> Result<&'a [u8], KtxError> {
        let end = self.pos.checked_add(n).ok_or_else(|| self.truncated(n))?;
        let bytes = self.data.get(self.pos..end).ok_or_else(|| self.truncated(n))?;
        self.pos = end;
        Ok(bytes)
    }

    pub(crate) fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], KtxError> {
        let bytes = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub(crate) fn get_u32(&mut self, endian: Endian) -> Result<u32, KtxError> {
        Ok(endian.u32(self.read_fixed_bytes()?))
    }
}

// ── Header ──────────────────────────────────────────────────────────

/// Parsed KTX header fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KtxHeader {
    pub endian: Endian,
    pub gl_type: u32,
    pub gl_type_size: u32,
    pub gl_format: u32,
    pub gl_internal_format: u32,
    pub gl_base_internal_format: u32,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub pixel_depth: u32,
    pub array_elements: u32,
    pub faces: u32,
    pub mip_levels: u32,
    pub key_value_bytes: u32,
}

impl KtxHeader {
    /// Width and height of the first image. 1D textures report height 1.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.pixel_width, self.pixel_height.max(1))
    }

    /// Offset of the `imageSize` field of mip level 0.
    pub fn data_offset(&self) -> usize {
        HEADER_LEN.saturating_add(self.key_value_bytes as usize)
    }

    /// Iterate the key/value pairs stored in `data` (the whole file).
    pub fn key_values<'d>(&self, data: &'d [u8]) -> KeyValues<'d> {
        let end = self.data_offset().min(data.len());
        let kv = data.get(HEADER_LEN..end).unwrap_or_default();
        KeyValues::new(kv, self.endian)
    }
}

/// Parse and validate the fixed header.
///
/// Only the first [`HEADER_LEN`] bytes are read.
pub fn parse_header(data: &[u8]) -> Result<KtxHeader, KtxError> {
    let prefix = data.len().min(MAGIC.len());
    if data[..prefix] != MAGIC[..prefix] {
        return Err(KtxError::InvalidSignature);
    }

    let mut cursor = Cursor::new(data);
    cursor.skip(MAGIC.len())?;

    let endian = Endian::from_marker(cursor.read_fixed_bytes()?)?;

    let mut fields = [0u32; 12];
    for field in &mut fields {
        *field = cursor.get_u32(endian)?;
    }
    let [
        gl_type,
        gl_type_size,
        gl_format,
        gl_internal_format,
        gl_base_internal_format,
        pixel_width,
        pixel_height,
        pixel_depth,
        array_elements,
        faces,
        mip_levels,
        key_value_bytes,
    ] = fields;

    log::debug!("ktx: endianness {endian:?}");
    log::debug!("ktx: glType {}", TypeName(gl_type));
    log::debug!("ktx: glTypeSize {gl_type_size}");
    log::debug!("ktx: glFormat {}", FormatName(gl_format));
    log::debug!("ktx: glInternalFormat {}", FormatName(gl_internal_format));
    log::debug!(
        "ktx: glBaseInternalFormat {}",
        FormatName(gl_base_internal_format)
    );
    log::debug!("ktx: {pixel_width}x{pixel_height}x{pixel_depth}");
    log::debug!(
        "ktx: arrayElements {array_elements} faces {faces} mipLevels {mip_levels} keyValueBytes {key_value_bytes}"
    );

    if pixel_width == 0 {
        return Err(KtxError::InvalidHeader("pixelWidth is zero".into()));
    }

    Ok(KtxHeader {
        endian,
        gl_type,
        gl_type_size,
        gl_format,
        gl_internal_format,
        gl_base_internal_format,
        pixel_width,
        pixel_height,
        pixel_depth,
        array_elements,
        faces,
        mip_levels,
        key_value_bytes,
    })
}

// ── Key/value data ──────────────────────────────────────────────────

/// One metadata entry: a NUL-terminated key followed by an opaque value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyValue<'d> {
    pub key: &'d [u8],
    pub value: &'d [u8],
}

impl<'d> KeyValue<'d> {
    /// The key as UTF-8, if valid.
    pub fn key_str(&self) -> Option<&'d str> {
        core::str::from_utf8(self.key).ok()
    }
}

/// Iterator over key/value pairs. Stops at the first malformed entry.
#[derive(Clone, Debug)]
pub struct KeyValues<'d> {
    cursor: Cursor<'d>,
    endian: Endian,
}

impl<'d> KeyValues<'d> {
    pub(crate) fn new(data: &'d [u8], endian: Endian) -> Self {
        Self {
            cursor: Cursor::new(data),
            endian,
        }
    }
}

impl<'d> KeyValues<'d> {
    fn read_entry(&mut self) -> Option<KeyValue<'d>> {
        let size = self.cursor.get_u32(self.endian).ok()? as usize;
        let entry = self.cursor.take(size).ok()?;
        // Entries are padded to a multiple of 4 bytes; the last may omit it.
        let padding = (4 - size % 4) % 4;
        if self.cursor.skip(padding).is_err() {
            self.cursor = Cursor::new(&[]);
        }
        let nul = entry.iter().position(|&b| b == 0)?;
        Some(KeyValue {
            key: &entry[..nul],
            value: &entry[nul + 1..],
        })
    }
}

impl<'d> Iterator for KeyValues<'d> {
    type Item = KeyValue<'d>;

    fn next(&mut self) -> Option<KeyValue<'d>> {
        let entry = self.read_entry();
        if entry.is_none() {
            self.cursor = Cursor::new(&[]);
        }
        entry
    }
}

impl core::iter::FusedIterator for KeyValues<'_> {}
