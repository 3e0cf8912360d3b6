/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoding BMP and JPEG files to 8-bit grayscale
use log::{debug, trace};
use zune_bmp::{probe_bmp, BmpDecoder};
use zune_core::bytestream::ZCursor;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

use crate::errors::WorkflowErrors;

/// An 8-bit grayscale raster
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GrayRaster {
    pub width:  usize,
    pub height: usize,
    pub pixels: Vec<u8>
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum RasterFormat {
    Bmp,
    Jpeg
}

fn guess_format(data: &[u8]) -> Option<RasterFormat> {
    if probe_bmp(data) {
        return Some(RasterFormat::Bmp);
    }
    if data.starts_with(&[0xFF, 0xD8]) {
        return Some(RasterFormat::Jpeg);
    }
    None
}

/// Weighted luma with 16 bit fixed point weights (0.299, 0.587, 0.114)
#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let sum = u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471;
    ((sum + 0x8000) >> 16) as u8
}

/// Collapse interleaved samples to one gray sample per pixel, alpha is dropped
pub fn to_grayscale(pixels: &[u8], components: usize) -> Result<Vec<u8>, WorkflowErrors> {
    let gray = match components {
        1 => pixels.to_vec(),
        2 => pixels.chunks_exact(2).map(|px| px[0]).collect(),
        3 | 4 => pixels
            .chunks_exact(components)
            .map(|px| luma(px[0], px[1], px[2]))
            .collect(),
        _ => {
            return Err(WorkflowErrors::UnsupportedImage(format!(
                "Cannot convert {components} components to grayscale"
            )))
        }
    };
    Ok(gray)
}

fn components_of(len: usize, width: usize, height: usize) -> Result<usize, WorkflowErrors> {
    let pixels = width.saturating_mul(height);

    if pixels == 0 || len % pixels != 0 {
        return Err(WorkflowErrors::UnsupportedImage(format!(
            "Decoded {len} bytes do not match a {width}x{height} image"
        )));
    }
    Ok(len / pixels)
}

fn decode_jpeg(data: &[u8]) -> Result<(usize, usize, Vec<u8>), WorkflowErrors> {
    let options = DecoderOptions::default().jpeg_set_out_colorspace(ColorSpace::Luma);
    let mut decoder = JpegDecoder::new_with_options(ZCursor::new(data), options);

    let pixels = decoder
        .decode()
        .map_err(|err| WorkflowErrors::UnsupportedImage(format!("JPEG decoding failed: {err:?}")))?;
    let (width, height) = decoder
        .dimensions()
        .ok_or_else(|| WorkflowErrors::UnsupportedImage("JPEG has no dimensions".to_string()))?;

    Ok((width, height, pixels))
}

fn decode_bmp(data: &[u8]) -> Result<(usize, usize, Vec<u8>), WorkflowErrors> {
    let mut decoder = BmpDecoder::new(ZCursor::new(data));

    let pixels = decoder
        .decode()
        .map_err(|err| WorkflowErrors::UnsupportedImage(format!("BMP decoding failed: {err:?}")))?;
    let (width, height) = decoder
        .dimensions()
        .ok_or_else(|| WorkflowErrors::UnsupportedImage("BMP has no dimensions".to_string()))?;

    Ok((width, height, pixels))
}

/// Decode a BMP or JPEG file held in `data` and convert it to grayscale
pub fn decode_grayscale(data: &[u8]) -> Result<GrayRaster, WorkflowErrors> {
    let format = guess_format(data).ok_or_else(|| {
        WorkflowErrors::UnsupportedImage("Not a BMP or JPEG image".to_string())
    })?;
    debug!("Decoding raster as {:?}", format);

    let (width, height, pixels) = match format {
        RasterFormat::Bmp => decode_bmp(data)?,
        RasterFormat::Jpeg => decode_jpeg(data)?
    };
    let components = components_of(pixels.len(), width, height)?;
    trace!("{}x{} raster with {} components", width, height, components);

    Ok(GrayRaster {
        width,
        height,
        pixels: to_grayscale(&pixels, components)?
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luma_extremes() {
        assert_eq!(luma(0, 0, 0), 0);
        assert_eq!(luma(255, 255, 255), 255);
        assert_eq!(luma(255, 0, 0), 76);
        assert_eq!(luma(0, 255, 0), 150);
        assert_eq!(luma(0, 0, 255), 29);
    }

    #[test]
    fn alpha_is_dropped() {
        let gray = to_grayscale(&[10, 10, 10, 0, 200, 200, 200, 255], 4).unwrap();
        assert_eq!(gray, vec![10, 200]);

        let gray = to_grayscale(&[7, 1, 9, 2], 2).unwrap();
        assert_eq!(gray, vec![7, 9]);
    }

    #[test]
    fn unknown_data_is_unsupported() {
        let err = decode_grayscale(b"GIF89a").unwrap_err();
        assert!(matches!(err, WorkflowErrors::UnsupportedImage(_)));
    }

    #[test]
    fn component_count_must_divide() {
        assert_eq!(components_of(12, 2, 2).unwrap(), 3);
        assert!(components_of(13, 2, 2).is_err());
        assert!(components_of(0, 0, 2).is_err());
    }
}
