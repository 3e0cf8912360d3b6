use std::ffi::OsString;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// What `probe` reports about a dump
pub struct Metadata {
    file:          OsString,
    file_size:     u64,
    width:         u32,
    height:        u32,
    pixel_bytes:   u64,
    expected:      u64
}

impl Metadata {
    pub fn new(file: OsString, file_size: u64, width: u32, height: u32) -> Metadata {
        let header = fused_bmp::FUSED_HEADER_SIZE as u64;

        Metadata {
            file,
            file_size,
            width,
            height,
            pixel_bytes: file_size.saturating_sub(header),
            expected: u64::from(width) * u64::from(height)
        }
    }

    /// Whether the dump carries every pixel the header announces
    pub fn is_complete(&self) -> bool {
        self.pixel_bytes >= self.expected
    }
}

impl Serialize for Metadata {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("Metadata", 7)?;

        state.serialize_field("file", &self.file.to_string_lossy())?;
        state.serialize_field("file_size", &self.file_size)?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.serialize_field("expected_pixel_bytes", &self.expected)?;
        state.serialize_field("pixel_bytes", &self.pixel_bytes)?;
        state.serialize_field("complete", &self.is_complete())?;

        state.end()
    }
}
