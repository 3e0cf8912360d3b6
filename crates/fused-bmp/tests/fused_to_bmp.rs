/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::{remove_file, write};
use std::path::PathBuf;

use fused_bmp::{
    decode_fused, encode_fused, patch_header, BmpEncoder, BmpField, BmpHeaderTemplate,
    BmpOptions, FusedErrors, GrayscalePalette, RowOrder, BMP_HEADER_SIZE, PATCHED_FIELDS
};
use nanorand::{Rng, WyRand};

/// Header of a 1x1 24-bit BMP as written by a common image editor
fn real_template() -> Vec<u8> {
    let mut header = vec![0_u8; BMP_HEADER_SIZE];

    header[0..2].copy_from_slice(b"BM");
    header[2..6].copy_from_slice(&58_u32.to_le_bytes());
    header[10..14].copy_from_slice(&54_u32.to_le_bytes());
    // BITMAPINFOHEADER
    header[14..18].copy_from_slice(&40_u32.to_le_bytes());
    header[18..22].copy_from_slice(&1_u32.to_le_bytes());
    header[22..26].copy_from_slice(&1_u32.to_le_bytes());
    header[26..28].copy_from_slice(&1_u16.to_le_bytes());
    header[28..30].copy_from_slice(&24_u16.to_le_bytes());
    header[34..38].copy_from_slice(&4_u32.to_le_bytes());
    header[38..42].copy_from_slice(&2835_u32.to_le_bytes());
    header[42..46].copy_from_slice(&2835_u32.to_le_bytes());
    header
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("fused-bmp-{}-{}", std::process::id(), name))
}

#[test]
fn two_by_one_scenario() {
    let image = decode_fused(&[0x02, 0, 0, 0, 0x01, 0, 0, 0, 0xAA, 0xBB]).unwrap();
    assert_eq!(image.dimensions(), (2, 1));
    assert_eq!(image.pixels(), &[0xAA, 0xBB]);

    let template = BmpHeaderTemplate::from_bytes(&real_template(), BMP_HEADER_SIZE).unwrap();
    let bmp = BmpEncoder::new(template, BmpOptions::default())
        .encode(&image)
        .unwrap();

    assert_eq!(bmp.len(), 54 + 1024 + 2);
    assert_eq!(&bmp[18..22], &[0x02, 0x00, 0x00, 0x00]);
    assert_eq!(&bmp[22..26], &[0x01, 0x00, 0x00, 0x00]);
    assert_eq!(&bmp[1078..], &[0xAA, 0xBB]);
}

#[test]
fn round_trip_size_invariant() {
    let mut rng = WyRand::new_seed(0x5eed);
    let template = BmpHeaderTemplate::from_bytes(&real_template(), BMP_HEADER_SIZE).unwrap();
    let encoder = BmpEncoder::new(template, BmpOptions::default());

    for _ in 0..50 {
        let width = rng.generate_range(1_u32..=97);
        let height = rng.generate_range(1_u32..=61);
        let pixels: Vec<u8> = (0..width * height).map(|_| rng.generate::<u8>()).collect();

        let dump = encode_fused(width, height, &pixels).unwrap();
        let image = decode_fused(&dump).unwrap();
        let bmp = encoder.encode(&image).unwrap();

        assert_eq!(read_u32(&bmp, 18), width);
        assert_eq!(read_u32(&bmp, 22), height);
        assert_eq!(read_u32(&bmp, 2) as usize, 54 + 1024 + pixels.len());
        assert_eq!(read_u32(&bmp, 2) as usize, bmp.len());
        assert_eq!(read_u32(&bmp, 10), 1078);
        assert_eq!(&bmp[1078..], pixels.as_slice());
    }
}

#[test]
fn template_fields_pass_through() {
    let source = real_template();
    let template = BmpHeaderTemplate::from_bytes(&source, BMP_HEADER_SIZE).unwrap();
    let patched = patch_header(template, 320, 240, 320 * 240).unwrap();
    let bytes = patched.as_bytes();

    // magic, DIB size, planes, compression, image size, resolution
    assert_eq!(&bytes[0..2], b"BM");
    assert_eq!(read_u32(bytes, 14), 40);
    assert_eq!(&bytes[26..28], &[1, 0]);
    assert_eq!(&bytes[30..54], &source[30..54]);

    assert_eq!(patched.field(BmpField::BitsPerPixel), Some(8));
}

#[test]
fn random_templates_are_patched_non_destructively() {
    let mut rng = WyRand::new_seed(42);

    for _ in 0..20 {
        let source: Vec<u8> = (0..BMP_HEADER_SIZE).map(|_| rng.generate::<u8>()).collect();
        let template = BmpHeaderTemplate::from_bytes(&source, BMP_HEADER_SIZE).unwrap();
        let patched = patch_header(template, rng.generate(), rng.generate(), 1000).unwrap();

        let touched = |pos: usize| {
            PATCHED_FIELDS
                .iter()
                .any(|f| (f.offset()..f.end()).contains(&pos))
        };
        for pos in (0..BMP_HEADER_SIZE).filter(|p| !touched(*p)) {
            assert_eq!(source[pos], patched.as_bytes()[pos]);
        }
    }
}

#[test]
fn palette_follows_header() {
    let image = decode_fused(&[1, 0, 0, 0, 1, 0, 0, 0, 0x7F]).unwrap();
    let template = BmpHeaderTemplate::from_bytes(&real_template(), BMP_HEADER_SIZE).unwrap();
    let bmp = BmpEncoder::new(template, BmpOptions::default())
        .encode(&image)
        .unwrap();

    assert_eq!(&bmp[54..1078], GrayscalePalette::build().as_bytes());
    // the single pixel indexes gray level 0x7F
    let entry = 54 + 0x7F * 4;
    assert_eq!(&bmp[entry..entry + 4], &[0x7F, 0x7F, 0x7F, 0]);
}

#[test]
fn padded_bottom_up_layout() {
    let pixels: Vec<u8> = (1..=6).collect();
    let image = decode_fused(&encode_fused(3, 2, &pixels).unwrap()).unwrap();
    let template = BmpHeaderTemplate::from_bytes(&real_template(), BMP_HEADER_SIZE).unwrap();

    let options = BmpOptions::default()
        .set_pad_rows(true)
        .set_row_order(RowOrder::BottomUp);
    let bmp = BmpEncoder::new(template, options).encode(&image).unwrap();

    assert_eq!(bmp.len(), 1078 + 8);
    assert_eq!(read_u32(&bmp, 2) as usize, bmp.len());
    assert_eq!(&bmp[1078..], &[4, 5, 6, 0, 1, 2, 3, 0]);
}

#[test]
fn template_from_file() {
    let path = temp_path("template.bmp");
    let mut contents = real_template();
    contents.extend_from_slice(&[0xFF; 10]);
    write(&path, &contents).unwrap();

    let template = BmpHeaderTemplate::load(&path, BMP_HEADER_SIZE).unwrap();
    remove_file(&path).unwrap();

    assert_eq!(template.as_bytes(), &contents[..BMP_HEADER_SIZE]);
}

#[test]
fn forty_byte_template_file_is_invalid() {
    let path = temp_path("short.bmp");
    write(&path, [0_u8; 40]).unwrap();

    let err = BmpHeaderTemplate::load(&path, BMP_HEADER_SIZE).unwrap_err();
    remove_file(&path).unwrap();

    assert!(matches!(err, FusedErrors::InvalidTemplate(54, 40)));
}

#[test]
fn missing_template_is_io_error() {
    let err = BmpHeaderTemplate::load(temp_path("does-not-exist.bmp"), BMP_HEADER_SIZE).unwrap_err();
    assert!(matches!(err, FusedErrors::IoErrors(_)));
}

#[test]
fn five_byte_dump_is_truncated() {
    let err = decode_fused(&[0x02, 0, 0, 0, 0x01]).unwrap_err();
    assert!(matches!(err, FusedErrors::TruncatedHeader(5)));
}

#[test]
fn truncated_pixels_are_never_padded() {
    let err = decode_fused(&[4, 0, 0, 0, 4, 0, 0, 0, 1, 2, 3]).unwrap_err();
    assert!(matches!(err, FusedErrors::TruncatedPixelData(16, 3)));
}
