/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Minimal header patching.
//!
//! Only the fields in [`PATCHED_FIELDS`] are written, every other byte of the
//! template is carried over unchanged.

use log::{debug, trace};

use crate::errors::FusedErrors;
use crate::palette::PALETTE_SIZE;
use crate::template::{BmpHeaderTemplate, BMP_HEADER_SIZE};

/// Bits per pixel written to the header, one palette index per byte
const BITS_PER_PIXEL: u16 = 8;

/// Header fields rewritten for every image
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BmpField {
    /// `bfSize`, total file size
    FileSize,
    /// `bfOffBits`, start of the pixel array
    PixelDataOffset,
    /// `biWidth`
    Width,
    /// `biHeight`
    Height,
    /// `biBitCount`
    BitsPerPixel
}

impl BmpField {
    pub const fn offset(self) -> usize {
        match self {
            BmpField::FileSize => 2,
            BmpField::PixelDataOffset => 10,
            BmpField::Width => 18,
            BmpField::Height => 22,
            BmpField::BitsPerPixel => 28
        }
    }

    /// Field size in bytes
    pub const fn width(self) -> usize {
        match self {
            BmpField::BitsPerPixel => 2,
            _ => 4
        }
    }

    pub const fn end(self) -> usize {
        self.offset() + self.width()
    }
}

/// Every field the patcher is allowed to touch
pub const PATCHED_FIELDS: [BmpField; 5] = [
    BmpField::FileSize,
    BmpField::PixelDataOffset,
    BmpField::Width,
    BmpField::Height,
    BmpField::BitsPerPixel
];

// the canonical header must hold every patched field
const _: () = {
    let mut i = 0;
    while i < PATCHED_FIELDS.len() {
        assert!(PATCHED_FIELDS[i].end() <= BMP_HEADER_SIZE);
        i += 1;
    }
};

impl BmpHeaderTemplate {
    /// Read a patched field back as an unsigned little endian integer.
    ///
    /// Returns `None` if the template is too short to hold it
    pub fn field(&self, field: BmpField) -> Option<u32> {
        let bytes = self.as_bytes().get(field.offset()..field.end())?;

        let value = match *bytes {
            [a, b] => u32::from(u16::from_le_bytes([a, b])),
            [a, b, c, d] => u32::from_le_bytes([a, b, c, d]),
            _ => return None
        };
        Some(value)
    }

    fn write_field(&mut self, field: BmpField, value: u32) {
        let dest = &mut self.as_bytes_mut()[field.offset()..field.end()];

        match field.width() {
            2 => dest.copy_from_slice(&(value as u16).to_le_bytes()),
            _ => dest.copy_from_slice(&value.to_le_bytes())
        }
    }
}

/// Rewrite the size, offset and dimension fields of `template`
/// for an 8-bit image of `width` x `height` whose pixel array is
/// `pixel_data_size` bytes long.
///
/// The template length is taken as the header size, the palette is
/// expected right after it and the pixels right after the palette.
///
/// # Errors
/// - [`FusedErrors::TemplateTooSmall`] if a field does not fit in the template,
///   nothing is written in that case.
/// - [`FusedErrors::TooLargeDimensions`] if the file size overflows 32 bits
pub fn patch_header(
    mut template: BmpHeaderTemplate, width: u32, height: u32, pixel_data_size: usize
) -> Result<BmpHeaderTemplate, FusedErrors> {
    if let Some(field) = PATCHED_FIELDS.iter().find(|f| f.end() > template.len()) {
        return Err(FusedErrors::TemplateTooSmall(
            field.offset(),
            field.width(),
            template.len()
        ));
    }

    let data_offset = (template.len() + PALETTE_SIZE) as u64;
    let file_size = data_offset.saturating_add(pixel_data_size as u64);

    let file_size = u32::try_from(file_size).map_err(|_| FusedErrors::TooLargeDimensions(file_size))?;
    // smaller than file_size, cannot fail after the check above
    let data_offset = data_offset as u32;

    debug!(
        "Patching header: width={} height={} file size={} data offset={}",
        width, height, file_size, data_offset
    );

    template.write_field(BmpField::FileSize, file_size);
    template.write_field(BmpField::PixelDataOffset, data_offset);
    template.write_field(BmpField::Width, width);
    template.write_field(BmpField::Height, height);
    template.write_field(BmpField::BitsPerPixel, u32::from(BITS_PER_PIXEL));

    trace!("Patched header bytes {:?}", template.as_bytes());

    Ok(template)
}
