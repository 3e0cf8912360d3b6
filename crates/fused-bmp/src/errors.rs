/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};
use std::io;

/// Errors that can occur while decoding a fused image dump
/// or producing a BMP from it
#[non_exhaustive]
pub enum FusedErrors {
    /// Fewer than 8 bytes, the width and height are missing.
    ///
    /// Contains the number of bytes found
    TruncatedHeader(usize),
    /// The header asks for more pixels than the dump carries,
    /// expected, found
    TruncatedPixelData(u64, usize),
    /// The template file is shorter than the header size,
    /// expected, found
    InvalidTemplate(usize, usize),
    /// A patched field does not fit in the template buffer,
    /// field offset, field width, template length
    TemplateTooSmall(usize, usize, usize),
    /// Declared and real sizes disagree, expected, found
    SizeMismatch(u64, u64),
    /// The image does not fit the 32 bit size fields of a BMP
    TooLargeDimensions(u64),
    /// An external encoder (e.g. JPEG) failed
    DownstreamEncodingFailed(String),
    /// Underlying read/write fault
    IoErrors(io::Error)
}

impl Debug for FusedErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TruncatedHeader(found) => {
                writeln!(
                    f,
                    "Truncated header, expected {} bytes for width and height but found {}",
                    crate::FUSED_HEADER_SIZE,
                    found
                )
            }
            Self::TruncatedPixelData(expected, found) => {
                writeln!(
                    f,
                    "Truncated pixel data, expected {expected} bytes but found {found}"
                )
            }
            Self::InvalidTemplate(expected, found) => {
                writeln!(
                    f,
                    "Invalid template, expected at least {expected} header bytes but found {found}"
                )
            }
            Self::TemplateTooSmall(offset, width, len) => {
                writeln!(
                    f,
                    "Template too small, field at offset {offset} ({width} bytes) does not fit in {len} bytes"
                )
            }
            Self::SizeMismatch(expected, found) => {
                writeln!(f, "Size mismatch, expected {expected} but found {found}")
            }
            Self::TooLargeDimensions(size) => {
                writeln!(f, "Too large image, {size} bytes does not fit a BMP")
            }
            Self::DownstreamEncodingFailed(reason) => {
                writeln!(f, "Downstream encoding failed: {reason}")
            }
            Self::IoErrors(err) => {
                writeln!(f, "I/O error: {err}")
            }
        }
    }
}

impl Display for FusedErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for FusedErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoErrors(err) => Some(err),
            _ => None
        }
    }
}

impl From<io::Error> for FusedErrors {
    fn from(value: io::Error) -> Self {
        FusedErrors::IoErrors(value)
    }
}
