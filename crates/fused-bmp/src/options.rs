/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! BMP output options

/// How pixel rows are laid out in the BMP pixel array.
///
/// The height field is always written as a positive number, which BMP
/// readers take to mean the first stored row is the bottom of the image.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum RowOrder {
    /// Rows are written in the order they appear in the dump.
    ///
    /// A dump stored top-down shows up vertically mirrored.
    #[default]
    AsStored,
    /// Rows are reversed so a top-down dump displays upright
    BottomUp
}

/// Options for BMP output
///
/// The defaults reproduce the layout existing consumers read:
/// rows as stored, no row padding. The header size is whatever
/// the template holds, see [`BmpHeaderTemplate::load`](crate::BmpHeaderTemplate::load).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BmpOptions {
    row_order: RowOrder,
    pad_rows:  bool
}

impl Default for BmpOptions {
    fn default() -> Self {
        Self {
            row_order: RowOrder::AsStored,
            pad_rows:  false
        }
    }
}

impl BmpOptions {
    /// Set the row order of the pixel array
    ///
    /// - Default value: [`RowOrder::AsStored`]
    #[must_use]
    pub const fn set_row_order(mut self, order: RowOrder) -> Self {
        self.row_order = order;
        self
    }

    /// Pad every row with zeroes to a multiple of 4 bytes, as the BMP
    /// format requires. Off by default, the unpadded layout is only
    /// correct when width is a multiple of 4.
    #[must_use]
    pub const fn set_pad_rows(mut self, yes: bool) -> Self {
        self.pad_rows = yes;
        self
    }

    pub const fn row_order(&self) -> RowOrder {
        self.row_order
    }

    pub const fn pad_rows(&self) -> bool {
        self.pad_rows
    }
}
