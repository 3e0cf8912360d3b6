/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Fused image dumps and 8-bit grayscale BMP output.
//!
//! A fused image dump is what the acquisition firmware writes after fusing two
//! exposures, the same fusion is available here as [`fuse_images`]. It has the
//! following format:
//! ```text
//! ╔══════════════╤═══════════════════════════════════════════════╗
//! ║ Bytes        │ Description                                   ║
//! ╠══════════════╪═══════════════════════════════════════════════╣
//! ║ 4            │ 32-Bit LE unsigned integer (width)            ║
//! ╟──────────────┼───────────────────────────────────────────────╢
//! ║ 4            │ 32-Bit LE unsigned integer (height)           ║
//! ╟──────────────┼───────────────────────────────────────────────╢
//! ║ width*height │ 8-Bit grayscale samples, row-major            ║
//! ╚══════════════╧═══════════════════════════════════════════════╝
//! ```
//!
//! The BMP side does not synthesize a header from scratch. A real BMP file
//! supplies the first 54 bytes (file header + `BITMAPINFOHEADER`) and only the
//! fields listed in [`PATCHED_FIELDS`] are rewritten. Everything else
//! (compression, resolution, color counts) is taken verbatim from the template.
//!
//! # Example
//! ```
//! use fused_bmp::{decode_fused, BmpEncoder, BmpHeaderTemplate, BmpOptions};
//!
//! fn main() -> Result<(), fused_bmp::FusedErrors> {
//!     let dump = [2, 0, 0, 0, 1, 0, 0, 0, 0xAA, 0xBB];
//!     let image = decode_fused(&dump)?;
//!
//!     let template = BmpHeaderTemplate::from_bytes(&[0; 54], 54)?;
//!     let bmp = BmpEncoder::new(template, BmpOptions::default()).encode(&image)?;
//!
//!     assert_eq!(bmp.len(), 54 + 1024 + 2);
//!     Ok(())
//! }
//! ```

pub use crate::assembler::{assemble, assemble_into, BmpEncoder};
pub use crate::decoder::{decode_fused, FusedDecoder, FusedImage, FUSED_HEADER_SIZE};
pub use crate::encoder::encode_fused;
pub use crate::emd::{emd_decompose, from_q16_16, to_q16_16, Q16_SHIFT};
pub use crate::errors::FusedErrors;
pub use crate::fusion::{
    decision_mask, fuse_images, fuse_with_mask, histogram_stretch, local_variance, AlphaChoice,
    THRESHOLD_PERCENT, VARIANCE_WINDOW
};
pub use crate::options::{BmpOptions, RowOrder};
pub use crate::palette::{GrayscalePalette, PALETTE_ENTRIES, PALETTE_SIZE};
pub use crate::patcher::{patch_header, BmpField, PATCHED_FIELDS};
pub use crate::rows::layout_rows;
pub use crate::template::{BmpHeaderTemplate, BMP_HEADER_SIZE};

mod assembler;
mod decoder;
mod emd;
mod encoder;
mod errors;
mod fusion;
mod options;
mod palette;
mod patcher;
mod rows;
mod template;
