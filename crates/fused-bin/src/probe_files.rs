/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::File;
use std::io::Read;
use std::path::Path;

use fused_bmp::{FusedDecoder, FUSED_HEADER_SIZE};
use log::warn;

use crate::errors::{AtStage, Stage, WorkflowErrors};
use crate::serde::Metadata;

/// Read only the header of the dump at `path`
pub fn probe_file(path: &Path) -> Result<Metadata, WorkflowErrors> {
    let file = File::open(path).at_stage(Stage::ReadInput)?;
    let size = file.metadata().at_stage(Stage::ReadInput)?.len();

    let mut header = Vec::with_capacity(FUSED_HEADER_SIZE);
    file.take(FUSED_HEADER_SIZE as u64)
        .read_to_end(&mut header)
        .at_stage(Stage::ReadInput)?;

    let mut decoder = FusedDecoder::new(&header);
    decoder.decode_headers().at_stage(Stage::DecodeDump)?;

    let (width, height) = decoder
        .dimensions()
        .ok_or_else(|| WorkflowErrors::GenericString("No dimensions after header".to_string()))?;

    Ok(Metadata::new(path.as_os_str().to_os_string(), size, width, height))
}

/// Probe input files, extract metadata, and print to standard output.
pub fn probe_input_files<'a, I>(paths: I) -> Result<(), WorkflowErrors>
where
    I: IntoIterator<Item = &'a Path>
{
    for path in paths {
        let metadata = probe_file(path)?;

        if !metadata.is_complete() {
            warn!("{:?} is missing pixel data", path);
        }
        let json = serde_json::to_string_pretty(&metadata)
            .map_err(|err| WorkflowErrors::GenericString(err.to_string()))?;

        println!("{}", json);
    }
    Ok(())
}
