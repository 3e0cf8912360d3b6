/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::read_dir;
use std::path::{Path, PathBuf};

use fused_bmp::FusedErrors;
use log::trace;

/// Extensions picked up by [`discover_images`], compared case-insensitively
pub const IMAGE_EXTENSIONS: [&str; 3] = ["bmp", "jpg", "jpeg"];

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// List BMP and JPEG files directly inside `dir`, sorted by name
pub fn discover_images(dir: &Path) -> Result<Vec<PathBuf>, FusedErrors> {
    let mut files = Vec::new();

    for entry in read_dir(dir)? {
        let path = entry?.path();

        if path.is_file() && has_image_extension(&path) {
            files.push(path);
        } else {
            trace!("Skipping {:?}", path);
        }
    }
    files.sort();

    Ok(files)
}
