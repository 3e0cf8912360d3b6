/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Photographic output through `jpeg-encoder`
use fused_bmp::{FusedErrors, FusedImage};
use jpeg_encoder::{ColorType, Encoder};
use log::{debug, warn};

/// Default quality, matches what existing tooling produced
pub const DEFAULT_QUALITY: u8 = 95;

fn jpeg_dimension(name: &str, value: u32) -> Result<u16, FusedErrors> {
    u16::try_from(value).map_err(|_| {
        FusedErrors::DownstreamEncodingFailed(format!(
            "{name} {value} exceeds the JPEG limit of {}",
            u16::MAX
        ))
    })
}

/// Encode `image` as a single channel baseline JPEG.
///
/// `quality` is on the usual 0-100 scale, 0 is treated as 1.
/// Huffman tables are optimized for the image.
pub fn encode_jpeg(image: &FusedImage, quality: u8) -> Result<Vec<u8>, FusedErrors> {
    let width = jpeg_dimension("width", image.width())?;
    let height = jpeg_dimension("height", image.height())?;

    let quality = if quality == 0 {
        warn!("Quality 0 is not supported, using 1");
        1
    } else {
        quality.min(100)
    };
    debug!("Encoding {}x{} JPEG at quality {}", width, height, quality);

    let mut out = Vec::with_capacity(image.pixels().len() / 4 + 1024);

    let mut encoder = Encoder::new(&mut out, quality);
    encoder.set_optimized_huffman_tables(true);
    encoder
        .encode(image.pixels(), width, height, ColorType::Luma)
        .map_err(|err| FusedErrors::DownstreamEncodingFailed(err.to_string()))?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use fused_bmp::{decode_fused, encode_fused};

    use super::*;

    fn gradient(width: u32, height: u32) -> FusedImage {
        let pixels: Vec<u8> = (0..width * height).map(|i| (i % 256) as u8).collect();
        decode_fused(&encode_fused(width, height, &pixels).unwrap()).unwrap()
    }

    #[test]
    fn produces_jfif_markers() {
        let jpeg = encode_jpeg(&gradient(16, 8), DEFAULT_QUALITY).unwrap();

        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn lower_quality_is_smaller() {
        let image = gradient(64, 64);
        let high = encode_jpeg(&image, 100).unwrap();
        let low = encode_jpeg(&image, 10).unwrap();

        assert!(low.len() < high.len());
    }

    #[test]
    fn zero_quality_still_encodes() {
        assert!(encode_jpeg(&gradient(8, 8), 0).is_ok());
    }

    #[test]
    fn wide_image_is_downstream_failure() {
        let image = gradient(70_000, 1);
        let err = encode_jpeg(&image, DEFAULT_QUALITY).unwrap_err();

        assert!(matches!(err, FusedErrors::DownstreamEncodingFailed(_)));
    }

    #[test]
    fn empty_image_is_downstream_failure() {
        let image = decode_fused(&[0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        let err = encode_jpeg(&image, DEFAULT_QUALITY).unwrap_err();

        assert!(matches!(err, FusedErrors::DownstreamEncodingFailed(_)));
    }
}
