/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! C header generation for linking grayscale images into firmware
use std::fmt::Write;

/// Linker section the pixel array is placed in unless told otherwise
pub const DEFAULT_SECTION: &str = "seg_sdram1";

/// Include guard for a header file name, `image.h` becomes `IMAGE_H`.
///
/// Sanitized like [`array_name`], so `3-frame.h` becomes `_3_FRAME_H`.
pub fn header_guard(file_name: &str) -> String {
    array_name(file_name).to_uppercase()
}

/// Turn a file stem into a usable C identifier.
///
/// Characters outside `[A-Za-z0-9_]` become `_` and a leading digit
/// gets a `_` prefix.
pub fn array_name(stem: &str) -> String {
    let mut name: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// Render the header text.
///
/// `pixels` is row-major with `width` samples per row, one array line is
/// written per row.
pub fn generate_c_header(
    file_name: &str, name: &str, width: usize, height: usize, pixels: &[u8], section: &str
) -> String {
    let guard = header_guard(file_name);
    // 6 chars per "0xAB, " plus the row indentation
    let mut out = String::with_capacity(pixels.len() * 6 + height * 6 + 512);

    // writing to a String never fails
    let _ = writeln!(out, "#ifndef {guard}");
    let _ = writeln!(out, "#define {guard}\n");
    let _ = writeln!(out, "#include <stdint.h>\n");

    let _ = writeln!(out, "const unsigned int {name}_width = {width};");
    let _ = writeln!(out, "const unsigned int {name}_height = {height};\n");
    let _ = writeln!(
        out,
        "const unsigned char {name}[] __attribute__((section(\"{section}\"))) = {{"
    );

    if width > 0 {
        for row in pixels.chunks(width) {
            out.push_str("    ");
            for (pos, pixel) in row.iter().enumerate() {
                if pos > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "0x{pixel:02X}");
            }
            out.push_str(",\n");
        }
    }
    out.push_str("};\n\n");
    let _ = writeln!(out, "#endif // {guard}");

    out
}
