//! Decoding synthesized KTX files.

use enough::Unstoppable;
use zenktx::ktx::gl::*;
use zenktx::*;

/// Minimal KTX writer for tests.
struct Ktx {
    big_endian: bool,
    fields: [u32; 12],
    kv: Vec<u8>,
    image_size: Option<u32>,
    payload: Vec<u8>,
}

fn ktx_file(gl_type: u32, gl_format: u32, internal: u32, width: u32, height: u32) -> Ktx {
    Ktx {
        big_endian: false,
        fields: [
            gl_type,
            u32::from(gl_type != 0),
            gl_format,
            internal,
            gl_format,
            width,
            height,
            0,
            0,
            1,
            1,
            0,
        ],
        kv: Vec::new(),
        image_size: None,
        payload: Vec::new(),
    }
}

impl Ktx {
    fn payload(mut self, bytes: &[u8]) -> Self {
        self.payload = bytes.to_vec();
        self
    }

    fn big_endian(mut self) -> Self {
        self.big_endian = true;
        self
    }

    fn image_size(mut self, n: u32) -> Self {
        self.image_size = Some(n);
        self
    }

    fn field(mut self, index: usize, v: u32) -> Self {
        self.fields[index] = v;
        self
    }

    fn key_value(mut self, key: &str, value: &[u8]) -> Self {
        let len = key.len() + 1 + value.len();
        self.kv.extend_from_slice(&self.u32_bytes(len as u32));
        self.kv.extend_from_slice(key.as_bytes());
        self.kv.push(0);
        self.kv.extend_from_slice(value);
        self.kv.resize(self.kv.len().next_multiple_of(4), 0);
        self
    }

    fn u32_bytes(&self, v: u32) -> [u8; 4] {
        if self.big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    }

    fn build(&self) -> Vec<u8> {
        let mut out = ktx::MAGIC.to_vec();
        out.extend_from_slice(&self.u32_bytes(0x0403_0201));
        let mut fields = self.fields;
        fields[11] = self.kv.len() as u32;
        for f in fields {
            out.extend_from_slice(&self.u32_bytes(f));
        }
        out.extend_from_slice(&self.kv);
        let image_size = self.image_size.unwrap_or(self.payload.len() as u32);
        out.extend_from_slice(&self.u32_bytes(image_size));
        out.extend_from_slice(&self.payload);
        out
    }
}

const FOUR_BYTES: [u8; 4] = [0x5A, 0xA5, 0x2B, 0xB2];

#[test]
fn luminance_4x1() {
    let data = ktx_file(GL_UNSIGNED_BYTE, GL_LUMINANCE, GL_LUMINANCE8, 4, 1)
        .payload(&FOUR_BYTES)
        .build();
    let decoded = decode(&data, Unstoppable).unwrap();
    assert_eq!((decoded.width, decoded.height), (4, 1));
    assert_eq!(decoded.color_model(), PixelFormat::Gray8);
    assert_eq!(decoded.bounds(), Rect::new(0, 0, 4, 1));
    assert!(decoded.is_borrowed());
    for (x, &y) in FOUR_BYTES.iter().enumerate() {
        let c = decoded.pixel_at(x as i32, 0);
        assert_eq!(c, Color::Gray8(Gray8 { y }));
        let v = u16::from(y) * 0x101;
        assert_eq!(c.to_rgba64(), Rgba64::new(v, v, v, 0xFFFF));
    }
}

#[test]
fn rgba4444_2x1() {
    let data = ktx_file(GL_UNSIGNED_SHORT_4_4_4_4, GL_RGBA, GL_RGBA4, 2, 1)
        .payload(&FOUR_BYTES)
        .build();
    let decoded = decode(&data, Unstoppable).unwrap();
    assert_eq!(decoded.format, TextureFormat::Packed(PixelFormat::Rgba4444));
    assert_eq!(decoded.pixel_at(0, 0), Color::Rgba4444(Rgba4444(0xA55A)));
    assert_eq!(decoded.pixel_at(1, 0), Color::Rgba4444(Rgba4444(0xB22B)));
    assert!(decoded.is_borrowed());
}

#[test]
fn config_needs_no_payload() {
    let full = ktx_file(GL_UNSIGNED_BYTE, GL_LUMINANCE, GL_LUMINANCE8, 4, 1)
        .payload(&FOUR_BYTES)
        .build();
    let header_only = &full[..ktx::HEADER_LEN];
    let info = decode_config(header_only).unwrap();
    assert_eq!((info.width, info.height), (4, 1));
    assert_eq!(info.format, TextureFormat::Packed(PixelFormat::Gray8));
    assert_eq!(info.color_model(), PixelFormat::Gray8);
    assert_eq!(info.header.gl_internal_format, GL_LUMINANCE8);
    assert!(matches!(
        decode(header_only, Unstoppable),
        Err(KtxError::TruncatedInput { .. })
    ));
}

#[test]
fn bad_signature() {
    let mut data = ktx_file(GL_UNSIGNED_BYTE, GL_LUMINANCE, 0, 4, 1)
        .payload(&FOUR_BYTES)
        .build();
    data[0] = 0xAC;
    assert!(matches!(
        decode(&data, Unstoppable),
        Err(KtxError::InvalidSignature)
    ));
    // A short prefix is enough to rule out a KTX file.
    assert!(matches!(
        decode_config(b"\x89PNG\r\n\x1a\n"),
        Err(KtxError::InvalidSignature)
    ));
    assert!(matches!(
        decode(&[], Unstoppable),
        Err(KtxError::TruncatedInput { .. })
    ));
}

#[test]
fn bad_endianness_marker() {
    let mut data = ktx_file(GL_UNSIGNED_BYTE, GL_LUMINANCE, 0, 4, 1)
        .payload(&FOUR_BYTES)
        .build();
    data[12..16].copy_from_slice(&[1, 1, 1, 1]);
    assert!(matches!(
        decode(&data, Unstoppable),
        Err(KtxError::InvalidEndianness([1, 1, 1, 1]))
    ));
}

#[test]
fn unsupported_combination_reports_all_fields() {
    let data = ktx_file(GL_UNSIGNED_BYTE, GL_RGBA, GL_RGBA8, 1, 1)
        .payload(&[0; 4])
        .build();
    match decode(&data, Unstoppable) {
        Err(KtxError::UnsupportedFormatCombination {
            gl_type,
            gl_format,
            gl_internal_format,
        }) => {
            assert_eq!(gl_type, GL_UNSIGNED_BYTE);
            assert_eq!(gl_format, GL_RGBA);
            assert_eq!(gl_internal_format, GL_RGBA8);
        }
        other => panic!("unexpected {other:?}"),
    }
    // Config-only probing rejects it too.
    assert!(decode_config(&data).is_err());
}

#[test]
fn short_payload_is_truncated() {
    let data = ktx_file(GL_UNSIGNED_BYTE, GL_LUMINANCE, 0, 4, 1)
        .payload(&FOUR_BYTES[..3])
        .build();
    assert!(matches!(
        decode(&data, Unstoppable),
        Err(KtxError::TruncatedInput {
            needed: 72,
            actual: 71
        })
    ));
}

#[test]
fn big_endian_container() {
    // Pure red in 5-6-5, stored as a big-endian word.
    let data = ktx_file(GL_UNSIGNED_SHORT_5_6_5, GL_RGB, GL_RGB565, 2, 1)
        .big_endian()
        .payload(&[0xF8, 0x00, 0x00, 0x1F])
        .build();
    let decoded = decode(&data, Unstoppable).unwrap();
    assert_eq!(decoded.header().endian, ktx::Endian::Big);
    assert!(!decoded.is_borrowed());
    assert_eq!(decoded.pixel_at(0, 0), Color::Rgb565(Rgb565(0xF800)));
    assert_eq!(
        decoded.pixel_at(1, 0).to_rgba64(),
        Rgba64::new(0, 0, 0xFFFF, 0xFFFF)
    );

    // Byte formats need no reordering.
    let data = ktx_file(GL_UNSIGNED_BYTE, GL_LUMINANCE, 0, 4, 1)
        .big_endian()
        .payload(&FOUR_BYTES)
        .build();
    let decoded = decode(&data, Unstoppable).unwrap();
    assert!(decoded.is_borrowed());
    assert_eq!(decoded.pixel_at(3, 0), Color::Gray8(Gray8 { y: 0xB2 }));
}

#[test]
fn etc1_container() {
    // One block: individual mode, table 0, all indices 0 (+2).
    let data = ktx_file(0, 0, GL_ETC1_RGB8_OES, 4, 4)
        .payload(&[0x12, 0x12, 0x12, 0x00, 0, 0, 0, 0])
        .build();
    let decoded = decode(&data, Unstoppable).unwrap();
    assert_eq!(decoded.format, TextureFormat::Etc1);
    assert_eq!(decoded.color_model(), PixelFormat::Rgb8);
    let etc1 = decoded.image().as_etc1().unwrap();
    assert_eq!(etc1.block_dimensions(), (1, 1));
    assert_eq!(decoded.pixel_at(0, 0), Color::Rgb8(Rgb8::new(0x13, 0x13, 0x13)));
    assert_eq!(decoded.pixel_at(3, 3), Color::Rgb8(Rgb8::new(0x24, 0x24, 0x24)));
    assert_eq!(decoded.pixel_at(4, 0), Color::Rgb8(Rgb8::default()));

    let planar = decoded.to_planar(&Unstoppable).unwrap();
    assert_eq!(planar.color_model(), PixelFormat::Rgb8);
    assert_eq!(planar.pixel_at(2, 1), decoded.pixel_at(2, 1));
}

#[test]
fn etc1_partial_blocks_need_whole_blocks() {
    let data = ktx_file(0, 0, GL_ETC1_RGB8_OES, 5, 5)
        .payload(&[0u8; 24])
        .build();
    assert!(matches!(
        decode(&data, Unstoppable),
        Err(KtxError::TruncatedInput { .. })
    ));
    let data = ktx_file(0, 0, GL_ETC1_RGB8_OES, 5, 5)
        .payload(&[0u8; 32])
        .build();
    let decoded = decode(&data, Unstoppable).unwrap();
    assert_eq!(decoded.image().as_etc1().unwrap().block_dimensions(), (2, 2));
}

#[test]
fn key_value_metadata() {
    let data = ktx_file(GL_UNSIGNED_BYTE, GL_LUMINANCE, 0, 4, 1)
        .key_value("KTXorientation", b"S=r,T=d\0")
        .key_value("tool", b"zenktx\0")
        .payload(&FOUR_BYTES)
        .build();
    let decoded = decode(&data, Unstoppable).unwrap();
    let pairs: Vec<_> = decoded.key_values().collect();
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].key_str(), Some("KTXorientation"));
    assert_eq!(pairs[0].value, b"S=r,T=d\0");
    assert_eq!(pairs[1].key_str(), Some("tool"));
    assert_eq!(pairs[1].value, b"zenktx\0");
    // Metadata does not shift the pixels.
    assert_eq!(decoded.pixel_at(0, 0), Color::Gray8(Gray8 { y: 0x5A }));

    let info = ImageInfo::from_bytes(&data).unwrap();
    assert_eq!(info.header.key_values(&data).count(), 2);
}

#[test]
fn limits_are_enforced() {
    let data = ktx_file(GL_UNSIGNED_BYTE, GL_RGB, GL_RGB8, 8, 8)
        .payload(&[0u8; 8 * 8 * 3])
        .build();

    let narrow = Limits {
        max_width: Some(4),
        ..Default::default()
    };
    assert!(matches!(
        DecodeRequest::new(&data).with_limits(&narrow).decode(Unstoppable),
        Err(KtxError::LimitExceeded(_))
    ));
    assert!(matches!(
        DecodeRequest::new(&data).with_limits(&narrow).decode_config(),
        Err(KtxError::LimitExceeded(_))
    ));

    let small_memory = Limits {
        max_memory_bytes: Some(100),
        ..Default::default()
    };
    assert!(matches!(
        DecodeRequest::new(&data)
            .with_limits(&small_memory)
            .decode(Unstoppable),
        Err(KtxError::LimitExceeded(_))
    ));

    let roomy = Limits {
        max_pixels: Some(64),
        max_memory_bytes: Some(192),
        ..Default::default()
    };
    assert!(
        DecodeRequest::new(&data)
            .with_limits(&roomy)
            .decode(Unstoppable)
            .is_ok()
    );
}

#[test]
fn etc1_materialization_is_limited() {
    // 64x64 ETC1: 2048 bytes of blocks, 12288 bytes once decompressed.
    let data = ktx_file(0, 0, GL_ETC1_RGB8_OES, 64, 64)
        .payload(&[0u8; 2048])
        .build();
    let limits = Limits {
        max_memory_bytes: Some(4096),
        ..Default::default()
    };
    let decoded = DecodeRequest::new(&data)
        .with_limits(&limits)
        .decode(Unstoppable)
        .unwrap();
    assert!(decoded.is_borrowed());
    assert!(matches!(
        decoded.to_planar(&Unstoppable),
        Err(KtxError::LimitExceeded(_))
    ));
    assert!(matches!(
        decoded.image().to_planar(Some(&limits), &Unstoppable),
        Err(KtxError::LimitExceeded(_))
    ));
    assert!(matches!(
        convert_image(&decoded, PixelFormat::Rgb8, Some(&limits), &Unstoppable),
        Err(KtxError::LimitExceeded(_))
    ));

    // Without limits the same texture materializes.
    let unlimited = decode(&data, Unstoppable).unwrap();
    let planar = unlimited.to_planar(&Unstoppable).unwrap();
    assert_eq!(planar.pixels().len(), 12288);
}

#[cfg(feature = "imgref")]
#[test]
fn imgvec_respects_memory_limit() {
    // 16x16 Gray8 payload is 256 bytes; canonical output needs 2048.
    let data = ktx_file(GL_UNSIGNED_BYTE, GL_LUMINANCE, 0, 16, 16)
        .payload(&[0x40; 256])
        .build();
    let limits = Limits {
        max_memory_bytes: Some(1024),
        ..Default::default()
    };
    let decoded = DecodeRequest::new(&data)
        .with_limits(&limits)
        .decode(Unstoppable)
        .unwrap();
    assert!(matches!(
        decoded.to_imgvec(),
        Err(KtxError::LimitExceeded(_))
    ));
}

#[test]
fn out_of_bounds_reads_zero() {
    let data = ktx_file(GL_UNSIGNED_BYTE, GL_BGRA, GL_RGBA8, 1, 1)
        .payload(&[0x10, 0x20, 0x30, 0xFF])
        .build();
    let decoded = decode(&data, Unstoppable).unwrap();
    let zero = PixelFormat::Bgra8888.zero();
    for (x, y) in [(1, 0), (0, 1), (-1, 0), (0, -1), (i32::MAX, i32::MIN)] {
        assert_eq!(decoded.pixel_at(x, y), zero);
    }
    assert_eq!(
        decoded.pixel_at(0, 0),
        Color::Bgra8888(Bgra8888 {
            b: 0x10,
            g: 0x20,
            r: 0x30,
            a: 0xFF
        })
    );
}

#[test]
fn padded_rows_follow_image_size() {
    // 3x2 RGB: 9-byte rows padded to 12.
    let mut payload = Vec::new();
    payload.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 0, 0]);
    payload.extend_from_slice(&[10, 11, 12, 13, 14, 15, 16, 17, 18, 0, 0, 0]);
    let data = ktx_file(GL_UNSIGNED_BYTE, GL_RGB, GL_RGB8, 3, 2)
        .payload(&payload)
        .build();
    let decoded = decode(&data, Unstoppable).unwrap();
    let planar = decoded.image().as_planar().unwrap();
    assert_eq!(planar.stride(), 12);
    assert_eq!(decoded.pixel_at(0, 1), Color::Rgb8(Rgb8::new(10, 11, 12)));
    assert_eq!(decoded.pixel_at(2, 1), Color::Rgb8(Rgb8::new(16, 17, 18)));

    // The same rows tightly packed.
    let tight: Vec<u8> = (1..=18).collect();
    let data = ktx_file(GL_UNSIGNED_BYTE, GL_RGB, GL_RGB8, 3, 2)
        .payload(&tight)
        .build();
    let decoded = decode(&data, Unstoppable).unwrap();
    assert_eq!(decoded.image().as_planar().unwrap().stride(), 9);
    assert_eq!(decoded.pixel_at(0, 1), Color::Rgb8(Rgb8::new(10, 11, 12)));
}

#[test]
fn one_dimensional_texture() {
    let data = ktx_file(GL_UNSIGNED_BYTE, GL_RED, GL_R8, 4, 0)
        .payload(&FOUR_BYTES)
        .build();
    let decoded = decode(&data, Unstoppable).unwrap();
    assert_eq!((decoded.width, decoded.height), (4, 1));
    assert_eq!(decoded.pixel_at(1, 0), Color::R8(R8 { r: 0xA5 }));
    assert_eq!(
        decoded.pixel_at(1, 0).to_rgba64(),
        Rgba64::new(0xA5A5, 0, 0, 0xFFFF)
    );
}

#[test]
fn zero_width_is_invalid() {
    let data = ktx_file(GL_UNSIGNED_BYTE, GL_LUMINANCE, 0, 0, 1).build();
    assert!(matches!(
        decode_config(&data),
        Err(KtxError::InvalidHeader(_))
    ));
}

#[test]
fn only_first_image_is_decoded() {
    // Three mip levels; the trailing levels are never read.
    let mut payload = FOUR_BYTES.to_vec();
    payload.extend_from_slice(&2u32.to_le_bytes());
    payload.extend_from_slice(&[0xEE, 0xEE]);
    let data = ktx_file(GL_UNSIGNED_BYTE, GL_LUMINANCE, 0, 4, 1)
        .field(10, 3)
        .image_size(4)
        .payload(&payload)
        .build();
    let decoded = decode(&data, Unstoppable).unwrap();
    assert_eq!(decoded.header().mip_levels, 3);
    assert_eq!(decoded.image().as_planar().unwrap().pixels(), &FOUR_BYTES);
}

#[test]
fn set_pixel_copies_borrowed_data() {
    let data = ktx_file(GL_UNSIGNED_SHORT_5_5_5_1, GL_RGBA, GL_RGB5_A1, 2, 1)
        .payload(&[0x01, 0x00, 0xFF, 0xFF])
        .build();
    let mut decoded = decode(&data, Unstoppable).unwrap();
    assert!(decoded.is_borrowed());
    let planar = decoded.image_mut().as_planar_mut().unwrap();
    planar.set_pixel(0, 0, Rgba64::OPAQUE_WHITE.into());
    assert!(!decoded.is_borrowed());
    assert_eq!(decoded.pixel_at(0, 0), Color::Rgba5551(Rgba5551(0xFFFF)));
    // The input buffer is untouched.
    assert_eq!(&data[data.len() - 4..], &[0x01, 0x00, 0xFF, 0xFF]);
}

#[test]
fn into_owned_detaches_from_input() {
    let owned = {
        let data = ktx_file(GL_UNSIGNED_BYTE, GL_LUMINANCE_ALPHA, GL_LUMINANCE8_ALPHA8, 2, 1)
            .key_value("k", b"v")
            .payload(&FOUR_BYTES)
            .build();
        decode(&data, Unstoppable).unwrap().into_owned()
    };
    assert!(!owned.is_borrowed());
    assert_eq!(owned.key_values().count(), 1);
    assert_eq!(
        owned.pixel_at(1, 0),
        Color::GrayAlpha8(GrayAlpha8 { y: 0x2B, a: 0xB2 })
    );
}

#[cfg(feature = "std")]
#[test]
fn decode_from_reader() {
    let data = ktx_file(GL_UNSIGNED_BYTE, GL_LUMINANCE, 0, 4, 1)
        .payload(&FOUR_BYTES)
        .build();
    let decoded = decode_reader(std::io::Cursor::new(data), Unstoppable).unwrap();
    assert_eq!(decoded.pixel_at(2, 0), Color::Gray8(Gray8 { y: 0x2B }));
}

#[cfg(feature = "imgref")]
#[test]
fn imgvec_of_canonical_pixels() {
    let data = ktx_file(GL_UNSIGNED_BYTE, GL_LUMINANCE, 0, 4, 1)
        .payload(&FOUR_BYTES)
        .build();
    let decoded = decode(&data, Unstoppable).unwrap();
    let img = decoded.to_imgvec().unwrap();
    assert_eq!((img.width(), img.height()), (4, 1));
    assert_eq!(img.buf()[0], rgb::Rgba::new(0x5A5A, 0x5A5A, 0x5A5A, 0xFFFF));
}
