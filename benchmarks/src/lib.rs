/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use fused_bmp::{encode_fused, BmpHeaderTemplate, BMP_HEADER_SIZE};
use nanorand::{Rng, WyRand};

/// Dump of a noisy `width x height` frame, the same for every run
pub fn sample_dump(width: u32, height: u32) -> Vec<u8> {
    let mut rng = WyRand::new_seed(0xbe4c);
    let mut pixels = vec![0_u8; width as usize * height as usize];
    rng.fill(&mut pixels);

    encode_fused(width, height, &pixels).unwrap()
}

/// Blank 54 byte BMP header
pub fn sample_template() -> BmpHeaderTemplate {
    let mut header = [0_u8; BMP_HEADER_SIZE];
    header[0..2].copy_from_slice(b"BM");
    header[14..18].copy_from_slice(&40_u32.to_le_bytes());
    header[26..28].copy_from_slice(&1_u16.to_le_bytes());

    BmpHeaderTemplate::from_bytes(&header, BMP_HEADER_SIZE).unwrap()
}
