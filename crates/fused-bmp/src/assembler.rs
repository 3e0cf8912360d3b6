/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Write;

use log::{debug, info};

use crate::decoder::FusedImage;
use crate::errors::FusedErrors;
use crate::options::BmpOptions;
use crate::palette::{GrayscalePalette, PALETTE_SIZE};
use crate::patcher::{patch_header, BmpField};
use crate::rows::layout_rows;
use crate::template::BmpHeaderTemplate;

/// Check that the declared file size matches what is about to be written
fn check_declared_size(template: &BmpHeaderTemplate, pixels: &[u8]) -> Result<u64, FusedErrors> {
    let expected = (template.len() + PALETTE_SIZE) as u64 + pixels.len() as u64;
    // a template too short to hold the field cannot match anything
    let declared = template
        .field(BmpField::FileSize)
        .map(u64::from)
        .unwrap_or(0);

    if declared != expected {
        return Err(FusedErrors::SizeMismatch(expected, declared));
    }
    Ok(expected)
}

/// Write `template ++ palette ++ pixels` to `writer`.
///
/// The template must already be patched for `pixels`.
///
/// # Errors
/// - [`FusedErrors::SizeMismatch`] if the template's file size field does not
///   describe this output, nothing is written in that case.
/// - [`FusedErrors::IoErrors`] on write failures
pub fn assemble_into<W: Write>(
    template: &BmpHeaderTemplate, palette: &GrayscalePalette, pixels: &[u8], writer: &mut W
) -> Result<u64, FusedErrors> {
    let size = check_declared_size(template, pixels)?;

    writer.write_all(template.as_bytes())?;
    writer.write_all(palette.as_bytes())?;
    writer.write_all(pixels)?;

    Ok(size)
}

/// Build the whole BMP file in memory
pub fn assemble(
    template: &BmpHeaderTemplate, palette: &GrayscalePalette, pixels: &[u8]
) -> Result<Vec<u8>, FusedErrors> {
    let size = check_declared_size(template, pixels)?;

    let mut out = Vec::with_capacity(size as usize);
    out.extend_from_slice(template.as_bytes());
    out.extend_from_slice(palette.as_bytes());
    out.extend_from_slice(pixels);

    Ok(out)
}

/// A grayscale BMP encoder driven by a header template
///
/// # Example
/// ```
/// use fused_bmp::{decode_fused, BmpEncoder, BmpHeaderTemplate, BmpOptions, RowOrder};
///
/// let image = decode_fused(&[1, 0, 0, 0, 2, 0, 0, 0, 10, 20]).unwrap();
/// let template = BmpHeaderTemplate::from_bytes(&[0; 54], 54).unwrap();
///
/// let options = BmpOptions::default().set_row_order(RowOrder::BottomUp);
/// let bmp = BmpEncoder::new(template, options).encode(&image).unwrap();
///
/// assert_eq!(&bmp[1078..], &[20, 10]);
/// ```
pub struct BmpEncoder {
    template: BmpHeaderTemplate,
    palette:  GrayscalePalette,
    options:  BmpOptions
}

impl BmpEncoder {
    /// Create an encoder which patches a copy of `template` for every image
    pub fn new(template: BmpHeaderTemplate, options: BmpOptions) -> BmpEncoder {
        BmpEncoder {
            template,
            palette: GrayscalePalette::build(),
            options
        }
    }

    pub const fn options(&self) -> &BmpOptions {
        &self.options
    }

    /// Encode `image` returning the BMP file bytes
    pub fn encode(&self, image: &FusedImage) -> Result<Vec<u8>, FusedErrors> {
        let (width, height) = image.dimensions();

        let pixels = layout_rows(width, height, image.pixels(), &self.options)?;
        debug!("Pixel array is {} bytes", pixels.len());

        let header = patch_header(self.template.clone(), width, height, pixels.len())?;
        let bmp = assemble(&header, &self.palette, &pixels)?;

        info!("Encoded {}x{} BMP, {} bytes", width, height, bmp.len());

        Ok(bmp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::BMP_HEADER_SIZE;

    fn blank_template() -> BmpHeaderTemplate {
        BmpHeaderTemplate::from_bytes(&[0; BMP_HEADER_SIZE], BMP_HEADER_SIZE).unwrap()
    }

    #[test]
    fn concatenates_in_order() {
        let palette = GrayscalePalette::build();
        let header = patch_header(blank_template(), 2, 1, 2).unwrap();
        let bmp = assemble(&header, &palette, &[0xAA, 0xBB]).unwrap();

        assert_eq!(bmp.len(), 1080);
        assert_eq!(&bmp[..54], header.as_bytes());
        assert_eq!(&bmp[54..1078], palette.as_bytes());
        assert_eq!(&bmp[1078..], &[0xAA, 0xBB]);
    }

    #[test]
    fn unpatched_template_is_a_mismatch() {
        let err = assemble(&blank_template(), &GrayscalePalette::build(), &[1, 2]).unwrap_err();
        assert!(matches!(err, FusedErrors::SizeMismatch(1080, 0)));
    }

    #[test]
    fn pixels_must_match_the_patch() {
        let header = patch_header(blank_template(), 2, 2, 4).unwrap();
        let mut sink = Vec::new();
        let err = assemble_into(&header, &GrayscalePalette::build(), &[1, 2, 3], &mut sink).unwrap_err();

        assert!(matches!(err, FusedErrors::SizeMismatch(1081, 1082)));
        assert!(sink.is_empty());
    }

    #[test]
    fn writer_and_vec_agree() {
        let palette = GrayscalePalette::build();
        let header = patch_header(blank_template(), 3, 1, 3).unwrap();

        let mut sink = Vec::new();
        let written = assemble_into(&header, &palette, &[1, 2, 3], &mut sink).unwrap();

        assert_eq!(written, sink.len() as u64);
        assert_eq!(sink, assemble(&header, &palette, &[1, 2, 3]).unwrap());
    }

    #[test]
    fn header_size_follows_the_template() {
        let template = BmpHeaderTemplate::from_bytes(&[0; 70], 70).unwrap();
        let image = crate::decode_fused(&[2, 0, 0, 0, 1, 0, 0, 0, 7, 9]).unwrap();
        let bmp = BmpEncoder::new(template, BmpOptions::default())
            .encode(&image)
            .unwrap();

        assert_eq!(bmp.len(), 70 + 1024 + 2);
        assert_eq!(&bmp[10..14], &(70_u32 + 1024).to_le_bytes());
        assert_eq!(&bmp[70 + 1024..], &[7, 9]);
    }
}
