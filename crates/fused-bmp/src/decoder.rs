/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::{info, trace, warn};

use crate::errors::FusedErrors;

/// Size of the width + height header of a fused dump
pub const FUSED_HEADER_SIZE: usize = 8;

/// A decoded fused image.
///
/// Obtained from [`FusedDecoder::decode`] or [`fuse_images`](crate::fuse_images),
/// both guarantee
/// `pixels().len() == width * height`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FusedImage {
    width:  u32,
    height: u32,
    pixels: Vec<u8>
}

impl FusedImage {
    /// Callers guarantee `pixels.len() == width * height`
    pub(crate) fn new(width: u32, height: u32, pixels: Vec<u8>) -> FusedImage {
        FusedImage {
            width,
            height,
            pixels
        }
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Width and height as a tuple
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major 8-bit grayscale samples
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Hand the pixel buffer to the next stage
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

/// A fused image dump decoder
///
/// # Example
/// ```
/// use fused_bmp::FusedDecoder;
///
/// let dump = [2, 0, 0, 0, 1, 0, 0, 0, 0xAA, 0xBB];
/// let mut decoder = FusedDecoder::new(&dump);
///
/// decoder.decode_headers().unwrap();
/// assert_eq!(decoder.dimensions(), Some((2, 1)));
///
/// let image = decoder.decode().unwrap();
/// assert_eq!(image.pixels(), &[0xAA, 0xBB]);
/// ```
pub struct FusedDecoder<'a> {
    data:            &'a [u8],
    width:           u32,
    height:          u32,
    decoded_headers: bool
}

impl<'a> FusedDecoder<'a> {
    /// Create a new decoder over the raw dump bytes
    pub fn new(data: &'a [u8]) -> FusedDecoder<'a> {
        FusedDecoder {
            data,
            width: 0,
            height: 0,
            decoded_headers: false
        }
    }

    /// Read the width and height
    pub fn decode_headers(&mut self) -> Result<(), FusedErrors> {
        if self.decoded_headers {
            return Ok(());
        }
        let header = self
            .data
            .get(..FUSED_HEADER_SIZE)
            .ok_or(FusedErrors::TruncatedHeader(self.data.len()))?;

        let (width, height) = header.split_at(4);
        // both halves are exactly 4 bytes
        self.width = u32::from_le_bytes([width[0], width[1], width[2], width[3]]);
        self.height = u32::from_le_bytes([height[0], height[1], height[2], height[3]]);

        info!("Image width: {}", self.width);
        info!("Image height: {}", self.height);

        self.decoded_headers = true;
        Ok(())
    }

    /// Number of pixel bytes the header announces.
    ///
    /// Computed in 64 bits, `u32::MAX * u32::MAX` still fits.
    pub fn expected_pixel_count(&self) -> Option<u64> {
        if self.decoded_headers {
            return Some(u64::from(self.width) * u64::from(self.height));
        }
        None
    }

    /// Return the width and height of the image, if headers were decoded
    pub const fn dimensions(&self) -> Option<(u32, u32)> {
        if self.decoded_headers {
            return Some((self.width, self.height));
        }
        None
    }

    /// Decode the dump, returning the image or an error
    pub fn decode(&mut self) -> Result<FusedImage, FusedErrors> {
        self.decode_headers()?;

        let expected = u64::from(self.width) * u64::from(self.height);
        let remaining = &self.data[FUSED_HEADER_SIZE..];

        let size = usize::try_from(expected)
            .ok()
            .filter(|size| *size <= remaining.len())
            .ok_or(FusedErrors::TruncatedPixelData(expected, remaining.len()))?;

        if remaining.len() > size {
            warn!(
                "Ignoring {} trailing bytes after pixel data",
                remaining.len() - size
            );
        }
        trace!("Copying {} pixel bytes", size);

        Ok(FusedImage {
            width:  self.width,
            height: self.height,
            pixels: remaining[..size].to_vec()
        })
    }
}

/// Decode a fused dump in one go
pub fn decode_fused(data: &[u8]) -> Result<FusedImage, FusedErrors> {
    FusedDecoder::new(data).decode()
}
