/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Number of entries in an 8-bit color table
pub const PALETTE_ENTRIES: usize = 256;
/// Size in bytes of the color table, 4 bytes (B, G, R, reserved) per entry
pub const PALETTE_SIZE: usize = PALETTE_ENTRIES * 4;

/// Identity grayscale color table.
///
/// Pixel bytes are used directly as palette indices, so entry `i` must be
/// gray level `i`.
#[derive(Clone, Eq, PartialEq)]
pub struct GrayscalePalette {
    table: [u8; PALETTE_SIZE]
}

impl GrayscalePalette {
    pub fn build() -> GrayscalePalette {
        let mut table = [0; PALETTE_SIZE];

        for (level, entry) in table.chunks_exact_mut(4).enumerate() {
            let level = level as u8;
            entry.copy_from_slice(&[level, level, level, 0]);
        }
        GrayscalePalette { table }
    }

    /// The `(blue, green, red, reserved)` entry at `index`
    pub fn entry(&self, index: u8) -> [u8; 4] {
        let start = usize::from(index) * 4;
        let mut entry = [0; 4];
        entry.copy_from_slice(&self.table[start..start + 4]);
        entry
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.table
    }
}

impl Default for GrayscalePalette {
    fn default() -> Self {
        Self::build()
    }
}

impl core::fmt::Debug for GrayscalePalette {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "GrayscalePalette({} entries)", PALETTE_ENTRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_is_its_gray_level() {
        let palette = GrayscalePalette::build();

        for i in 0..=255_u8 {
            assert_eq!(palette.entry(i), [i, i, i, 0]);
        }
        assert_eq!(palette.as_bytes().len(), 1024);
    }

    #[test]
    fn builds_are_identical() {
        assert_eq!(GrayscalePalette::build().as_bytes(), GrayscalePalette::build().as_bytes());
    }

    #[test]
    fn raw_layout() {
        let palette = GrayscalePalette::build();
        assert_eq!(&palette.as_bytes()[..8], &[0, 0, 0, 0, 1, 1, 1, 0]);
        assert_eq!(&palette.as_bytes()[1020..], &[255, 255, 255, 0]);
    }
}
