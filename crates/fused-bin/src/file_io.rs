/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;
use std::fs::{remove_file, rename, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use fused_bmp::FusedErrors;
use log::{debug, warn};

/// Sibling path the output is staged in before it is renamed into place
fn staging_path(out: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(out.file_name().unwrap_or_default());
    name.push(format!(".{}.tmp", std::process::id()));

    out.with_file_name(name)
}

fn write_staged(path: &Path, contents: &[u8]) -> Result<(), FusedErrors> {
    let mut writer = BufWriter::new(File::create(path)?);

    writer.write_all(contents)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    Ok(())
}

/// Write `contents` to `out` so that readers either see the previous file
/// or the complete new one.
///
/// Data goes to a hidden temporary file in the same directory first and is
/// renamed over `out` once fully written. The temporary file is removed on
/// failure.
pub fn write_atomically(out: &Path, contents: &[u8]) -> Result<(), FusedErrors> {
    let staging = staging_path(out);
    debug!("Staging {} bytes in {:?}", contents.len(), staging);

    let result = write_staged(&staging, contents).and_then(|_| Ok(rename(&staging, out)?));

    if result.is_err() && staging.exists() {
        if let Err(err) = remove_file(&staging) {
            warn!("Could not remove {:?}: {}", staging, err);
        }
    }
    result
}
