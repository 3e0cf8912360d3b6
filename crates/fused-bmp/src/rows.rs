/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::borrow::Cow;

use log::trace;

use crate::errors::FusedErrors;
use crate::options::{BmpOptions, RowOrder};

/// Arrange `pixels` (row-major, `width` bytes per row) into the BMP pixel
/// array described by `options`.
///
/// Borrows when no change is needed, which is the default.
pub fn layout_rows<'a>(
    width: u32, height: u32, pixels: &'a [u8], options: &BmpOptions
) -> Result<Cow<'a, [u8]>, FusedErrors> {
    let expected = u64::from(width) * u64::from(height);

    if expected != pixels.len() as u64 {
        return Err(FusedErrors::SizeMismatch(expected, pixels.len() as u64));
    }
    let flip = options.row_order() == RowOrder::BottomUp;
    let width = width as usize;
    let stride = if options.pad_rows() {
        (width + 3) & !3
    } else {
        width
    };

    if (!flip && stride == width) || width == 0 {
        return Ok(Cow::Borrowed(pixels));
    }
    trace!("Laying out rows, stride={} flip={}", stride, flip);

    let mut out = vec![0; stride * height as usize];
    let rows = pixels.chunks_exact(width);

    if flip {
        for (dest, src) in out.chunks_exact_mut(stride).zip(rows.rev()) {
            dest[..width].copy_from_slice(src);
        }
    } else {
        for (dest, src) in out.chunks_exact_mut(stride).zip(rows) {
            dest[..width].copy_from_slice(src);
        }
    }
    Ok(Cow::Owned(out))
}
