#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

const MAGIC: [u8; 12] = [
    0xAB, 0x4B, 0x54, 0x58, 0x20, 0x31, 0x31, 0xBB, 0x0D, 0x0A, 0x1A, 0x0A,
];

fn ktx(big_endian: bool, fields: [u32; 11], kv: &[u8], payload: &[u8]) -> Vec<u8> {
    let word = |v: u32| if big_endian { v.to_be_bytes() } else { v.to_le_bytes() };
    let mut out = MAGIC.to_vec();
    out.extend_from_slice(&word(0x0403_0201));
    for f in fields {
        out.extend_from_slice(&word(f));
    }
    out.extend_from_slice(&word(kv.len() as u32));
    out.extend_from_slice(kv);
    out.extend_from_slice(&word(payload.len() as u32));
    out.extend_from_slice(payload);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // glType, glTypeSize, glFormat, glInternalFormat, glBaseInternalFormat,
    // width, height, depth, arrayElements, faces, mipLevels
    let gray = [0x1401, 1, 0x1909, 0x8040, 0x1909, 4, 1, 0, 0, 1, 1];
    fs::write(
        format!("{dir}/gray_4x1.ktx"),
        ktx(false, gray, &[], &[0x5A, 0xA5, 0x2B, 0xB2]),
    )
    .unwrap();

    let rgba4444 = [0x8033, 2, 0x1908, 0x8056, 0x1908, 2, 1, 0, 0, 1, 1];
    fs::write(
        format!("{dir}/rgba4444_2x1.ktx"),
        ktx(false, rgba4444, &[], &[0x5A, 0xA5, 0x2B, 0xB2]),
    )
    .unwrap();

    let rgb565 = [0x8363, 2, 0x1907, 0x8D62, 0x1907, 2, 2, 0, 0, 1, 1];
    fs::write(
        format!("{dir}/rgb565_2x2_be.ktx"),
        ktx(true, rgb565, &[], &[0xF8, 0x00, 0x07, 0xE0, 0x00, 0x1F, 0xFF, 0xFF]),
    )
    .unwrap();

    // 3x2 RGB with rows padded to 4 bytes
    let rgb = [0x1401, 1, 0x1907, 0x8051, 0x1907, 3, 2, 0, 0, 1, 1];
    let mut padded = vec![0u8; 24];
    padded[..9].copy_from_slice(&[255, 0, 0, 0, 255, 0, 0, 0, 255]);
    padded[12..21].copy_from_slice(&[9, 8, 7, 6, 5, 4, 3, 2, 1]);
    fs::write(format!("{dir}/rgb_3x2_padded.ktx"), ktx(false, rgb, &[], &padded)).unwrap();

    let bgra = [0x1401, 1, 0x80E1, 0x8058, 0x80E1, 1, 1, 0, 0, 1, 1];
    let mut kv = Vec::new();
    let entry = b"KTXorientation\0S=r,T=d\0";
    kv.extend_from_slice(&(entry.len() as u32).to_le_bytes());
    kv.extend_from_slice(entry);
    kv.push(0);
    fs::write(
        format!("{dir}/bgra_1x1_kv.ktx"),
        ktx(false, bgra, &kv, &[0x10, 0x20, 0x30, 0x80]),
    )
    .unwrap();

    let etc1 = [0, 1, 0, 0x8D64, 0x1907, 5, 5, 0, 0, 1, 1];
    let blocks: Vec<u8> = (0..32u8).map(|i| i.wrapping_mul(37) ^ 0x5A).collect();
    fs::write(format!("{dir}/etc1_5x5.ktx"), ktx(false, etc1, &[], &blocks)).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/magic_only.bin"), MAGIC).unwrap();
    let mut bad_marker = ktx(false, gray, &[], &[0; 4]);
    bad_marker[12..16].copy_from_slice(&[1, 1, 1, 1]);
    fs::write(format!("{dir}/bad_endianness.bin"), bad_marker).unwrap();
    let short = ktx(false, gray, &[], &[0; 4]);
    fs::write(format!("{dir}/short_payload.bin"), &short[..short.len() - 2]).unwrap();

    println!("Generated seed corpus in {dir}/");
}
