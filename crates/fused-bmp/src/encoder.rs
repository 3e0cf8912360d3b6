/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Writer side of the fused dump format
use crate::decoder::FUSED_HEADER_SIZE;
use crate::errors::FusedErrors;

/// Encode `pixels` as a fused dump.
///
/// Produces the same bytes the acquisition firmware writes, width and height
/// as little endian `u32` followed by the samples.
///
/// # Errors
/// [`FusedErrors::SizeMismatch`] if `pixels` is not exactly `width * height` long
pub fn encode_fused(width: u32, height: u32, pixels: &[u8]) -> Result<Vec<u8>, FusedErrors> {
    let expected = u64::from(width) * u64::from(height);

    if expected != pixels.len() as u64 {
        return Err(FusedErrors::SizeMismatch(expected, pixels.len() as u64));
    }
    let mut out = Vec::with_capacity(FUSED_HEADER_SIZE + pixels.len());

    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(pixels);

    Ok(out)
}
