/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;

use crate::errors::FusedErrors;

/// File header (14 bytes) + `BITMAPINFOHEADER` (40 bytes)
pub const BMP_HEADER_SIZE: usize = 54;

/// Header bytes borrowed from a real BMP file.
///
/// The bytes are not interpreted, any source long enough is accepted.
/// Callers are responsible for handing in a genuine uncompressed BMP header,
/// the fields that are not patched are trusted as is.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BmpHeaderTemplate {
    bytes: Vec<u8>
}

impl BmpHeaderTemplate {
    /// Load the first `header_size` bytes of the file at `path`
    pub fn load<P: AsRef<Path>>(path: P, header_size: usize) -> Result<Self, FusedErrors> {
        let path = path.as_ref();
        debug!("Loading {} template bytes from {:?}", header_size, path);

        let file = BufReader::new(File::open(path)?);
        Self::from_reader(file, header_size)
    }

    /// Read the first `header_size` bytes of `reader`
    pub fn from_reader<R: Read>(reader: R, header_size: usize) -> Result<Self, FusedErrors> {
        let mut bytes = Vec::with_capacity(header_size);
        reader.take(header_size as u64).read_to_end(&mut bytes)?;

        if bytes.len() != header_size {
            return Err(FusedErrors::InvalidTemplate(header_size, bytes.len()));
        }
        Ok(BmpHeaderTemplate { bytes })
    }

    /// Take the first `header_size` bytes of `data`
    pub fn from_bytes(data: &[u8], header_size: usize) -> Result<Self, FusedErrors> {
        let bytes = data
            .get(..header_size)
            .ok_or(FusedErrors::InvalidTemplate(header_size, data.len()))?;

        Ok(BmpHeaderTemplate {
            bytes: bytes.to_vec()
        })
    }

    /// Header length, this is where the palette starts
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn forty_bytes_is_invalid() {
        let err = BmpHeaderTemplate::from_reader(Cursor::new([0_u8; 40]), BMP_HEADER_SIZE).unwrap_err();
        assert!(matches!(err, FusedErrors::InvalidTemplate(54, 40)));
    }

    #[test]
    fn only_the_prefix_is_kept() {
        let data: Vec<u8> = (0..100).collect();
        let template = BmpHeaderTemplate::from_reader(Cursor::new(&data), BMP_HEADER_SIZE).unwrap();

        assert_eq!(template.len(), 54);
        assert_eq!(template.as_bytes(), &data[..54]);
    }

    #[test]
    fn non_bmp_bytes_are_accepted() {
        let template = BmpHeaderTemplate::from_bytes(&[0xFF; 60], BMP_HEADER_SIZE).unwrap();
        assert_eq!(template.as_bytes(), &[0xFF; 54]);
    }

    #[test]
    fn short_slice_is_invalid() {
        let err = BmpHeaderTemplate::from_bytes(&[0; 10], BMP_HEADER_SIZE).unwrap_err();
        assert!(matches!(err, FusedErrors::InvalidTemplate(54, 10)));
    }
}
