#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(image_type: u8, depth: u8, width: u16, height: u16) -> Vec<u8> {
    let mut h = vec![0u8; 18];
    h[2] = image_type;
    h[12..14].copy_from_slice(&width.to_le_bytes());
    h[14..16].copy_from_slice(&height.to_le_bytes());
    h[16] = depth;
    h
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Raw 24-bit 2x1
    let mut tga = header(2, 24, 2, 1);
    tga.extend_from_slice(&[0, 0, 255, 0, 255, 0]);
    fs::write(format!("{dir}/raw_24.tga"), tga).unwrap();

    // RLE 32-bit 4x1, top-to-bottom
    let mut tga = header(10, 32, 4, 1);
    tga[17] = 0x28;
    tga.extend_from_slice(&[0x83, 1, 2, 3, 4]);
    fs::write(format!("{dir}/rle_32.tga"), tga).unwrap();

    // Color-mapped 8-bit index, 24-bit palette of 2 entries
    let mut tga = header(1, 8, 2, 1);
    tga[1] = 1;
    tga[5..7].copy_from_slice(&2u16.to_le_bytes());
    tga[7] = 24;
    tga.extend_from_slice(&[0, 0, 255, 255, 0, 0, 1, 0]);
    fs::write(format!("{dir}/mapped_8.tga"), tga).unwrap();

    // RLE grayscale with a v2 footer and a 495-byte extension area
    let mut tga = header(11, 8, 3, 1);
    tga.extend_from_slice(&[0x82, 128]);
    let ext_offset = tga.len() as u32;
    let mut ext = vec![0u8; 495];
    ext[0..2].copy_from_slice(&495u16.to_le_bytes());
    ext[494] = 3;
    tga.extend_from_slice(&ext);
    tga.extend_from_slice(&ext_offset.to_le_bytes());
    tga.extend_from_slice(&0u32.to_le_bytes());
    tga.extend_from_slice(b"TRUEVISION-XFILE.\0");
    fs::write(format!("{dir}/rle_gray_v2.tga"), tga).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/short_header.bin"), &header(2, 24, 1, 1)[..10]).unwrap();
    let mut tga = header(10, 24, 8, 8);
    tga.push(0xFF);
    fs::write(format!("{dir}/rle_truncated.tga"), tga).unwrap();

    println!("Generated seed corpus in {dir}/");
}
