/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::{create_dir_all, read};
use std::io::{stdin, BufRead};
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use fused_bmp::{
    decode_fused, encode_fused, fuse_images, BmpEncoder, BmpHeaderTemplate, FusedErrors
};
use log::{debug, error, info, warn};

use crate::c_header::{array_name, generate_c_header, DEFAULT_SECTION};
use crate::cmd_parsers::global_options::CmdOptions;
use crate::cmd_parsers::{get_bmp_options, get_header_size, paired_paths};
use crate::discover::discover_images;
use crate::errors::{AtStage, Stage, WorkflowErrors};
use crate::file_io::write_atomically;
use crate::jpeg::{encode_jpeg, DEFAULT_QUALITY};
use crate::probe_files::probe_input_files;
use crate::raster::{decode_grayscale, GrayRaster};

pub(crate) fn create_and_exec_workflow_from_cmd(
    args: &ArgMatches, cmd_opts: &CmdOptions
) -> Result<(), WorkflowErrors> {
    match args.subcommand() {
        Some(("bmp", sub)) => {
            info!("Creating BMP workflow from input");

            let options = get_bmp_options(sub);
            let template_path = sub
                .get_one::<PathBuf>("template")
                .ok_or_else(|| WorkflowErrors::GenericString("No template given".to_string()))?;

            let template = BmpHeaderTemplate::load(template_path, get_header_size(sub))
                .at_stage(Stage::LoadTemplate)?;
            let encoder = BmpEncoder::new(template, options);

            for (in_file, out_file) in paired_paths(sub)? {
                verify_file_paths(&in_file, &out_file, cmd_opts)?;
                dump_to_bmp(&in_file, &out_file, &encoder)?;
            }
            Ok(())
        }
        Some(("jpeg", sub)) => {
            info!("Creating JPEG workflow from input");

            let quality = sub
                .get_one::<u8>("quality")
                .copied()
                .unwrap_or(DEFAULT_QUALITY);

            for (in_file, out_file) in paired_paths(sub)? {
                verify_file_paths(&in_file, &out_file, cmd_opts)?;
                dump_to_jpeg(&in_file, &out_file, quality)?;
            }
            Ok(())
        }
        Some(("header", sub)) => {
            let dir = sub
                .get_one::<PathBuf>("dir")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("Images"));
            let out_dir = sub
                .get_one::<PathBuf>("out-dir")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("."));
            let section = sub
                .get_one::<String>("section")
                .map(String::as_str)
                .unwrap_or(DEFAULT_SECTION);

            let written = generate_headers(&dir, &out_dir, section)?;
            info!("Wrote {} headers to {:?}", written, out_dir);

            Ok(())
        }
        Some(("fuse", sub)) => {
            info!("Creating fusion workflow from input");

            let path = |id: &str| {
                sub.get_one::<PathBuf>(id)
                    .cloned()
                    .ok_or_else(|| WorkflowErrors::GenericString(format!("No {id} image given")))
            };
            let (first, second, out_file) = (path("first")?, path("second")?, path("out")?);

            verify_file_paths(&first, &out_file, cmd_opts)?;
            verify_file_paths(&second, &out_file, cmd_opts)?;

            fuse_files(&first, &second, &out_file)
        }
        Some(("probe", sub)) => {
            let inputs = sub
                .get_many::<PathBuf>("in")
                .map(|v| v.map(PathBuf::as_path).collect::<Vec<_>>())
                .unwrap_or_default();

            probe_input_files(inputs)
        }
        Some((name, _)) => Err(WorkflowErrors::GenericString(format!(
            "Unknown command {name}"
        ))),
        None => Err(WorkflowErrors::GenericString(
            "No command given, see --help".to_string()
        ))
    }
}

fn verify_file_paths(
    in_path: &Path, out_path: &Path, cmd_opts: &CmdOptions
) -> Result<(), WorkflowErrors> {
    if in_path == out_path {
        return Err(WorkflowErrors::GenericString(format!(
            "Cannot use {:?} as both input and output",
            in_path
        )));
    }

    if !in_path.exists() {
        return Err(WorkflowErrors::GenericString(format!(
            "Path {:?}, does not exist",
            in_path
        )));
    }

    if !in_path.is_file() {
        return Err(WorkflowErrors::GenericString(format!(
            "Path {:?} is not a file",
            in_path
        )));
    }

    if out_path.exists() {
        if cmd_opts.override_files {
            info!("Overwriting path {:?} ", out_path);
        } else {
            println!("File {:?} exists, overwrite [y/N]", out_path);
            let mut result = String::new();

            stdin()
                .lock()
                .read_line(&mut result)
                .at_stage(Stage::VerifyPaths)?;

            if result.trim() != "y" {
                return Err(WorkflowErrors::GenericString(format!(
                    "Not overwriting file {:?}",
                    out_path
                )));
            }
        }
    }
    Ok(())
}

/// Convert the dump at `input` to an 8-bit grayscale BMP at `output`.
///
/// Nothing is written to `output` unless the whole conversion succeeds.
pub fn dump_to_bmp(input: &Path, output: &Path, encoder: &BmpEncoder) -> Result<(), WorkflowErrors> {
    debug!("Treating {:?} as a fused dump", input);

    let data = read(input).at_stage(Stage::ReadInput)?;
    let image = decode_fused(&data).at_stage(Stage::DecodeDump)?;
    let bmp = encoder.encode(&image).at_stage(Stage::EncodeBmp)?;

    write_atomically(output, &bmp).at_stage(Stage::WriteOutput)?;
    info!("Wrote {:?}", output);

    Ok(())
}

/// Convert the dump at `input` to a grayscale JPEG at `output`
pub fn dump_to_jpeg(input: &Path, output: &Path, quality: u8) -> Result<(), WorkflowErrors> {
    debug!("Treating {:?} as a fused dump", input);

    let data = read(input).at_stage(Stage::ReadInput)?;
    let image = decode_fused(&data).at_stage(Stage::DecodeDump)?;
    let jpeg = encode_jpeg(&image, quality).at_stage(Stage::EncodeJpeg)?;

    write_atomically(output, &jpeg).at_stage(Stage::WriteOutput)?;
    info!("Wrote {:?}", output);

    Ok(())
}

fn read_raster(path: &Path) -> Result<GrayRaster, WorkflowErrors> {
    let data = read(path).at_stage(Stage::ReadInput)?;
    decode_grayscale(&data)
}

fn dimension(value: usize) -> Result<u32, WorkflowErrors> {
    u32::try_from(value)
        .map_err(|_| FusedErrors::TooLargeDimensions(value as u64))
        .at_stage(Stage::Fuse)
}

/// Fuse the BMP or JPEG images at `first` and `second` and write the result
/// as a dump to `output`.
///
/// Both images must have the same dimensions.
pub fn fuse_files(first: &Path, second: &Path, output: &Path) -> Result<(), WorkflowErrors> {
    let a = read_raster(first)?;
    let b = read_raster(second)?;

    if (a.width, a.height) != (b.width, b.height) {
        return Err(WorkflowErrors::GenericString(format!(
            "Cannot fuse {:?} ({}x{}) with {:?} ({}x{}), dimensions differ",
            first, a.width, a.height, second, b.width, b.height
        )));
    }
    let (width, height) = (dimension(a.width)?, dimension(a.height)?);

    let fused = fuse_images(width, height, &a.pixels, &b.pixels).at_stage(Stage::Fuse)?;
    let dump = encode_fused(width, height, fused.pixels()).at_stage(Stage::EncodeDump)?;

    write_atomically(output, &dump).at_stage(Stage::WriteOutput)?;
    info!("Wrote {:?}", output);

    Ok(())
}

/// Write `<stem>.h` for the image at `path` into `out_dir`, returning the
/// header path
pub fn image_to_header(path: &Path, out_dir: &Path, section: &str) -> Result<PathBuf, WorkflowErrors> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| WorkflowErrors::GenericString(format!("{:?} has no file name", path)))?;

    let raster = read_raster(path)?;

    let file_name = format!("{stem}.h");
    let text = generate_c_header(
        &file_name,
        &array_name(&stem),
        raster.width,
        raster.height,
        &raster.pixels,
        section
    );

    let out = out_dir.join(&file_name);
    write_atomically(&out, text.as_bytes()).at_stage(Stage::WriteOutput)?;

    Ok(out)
}

/// Generate a header for every image in `dir`.
///
/// A failing image does not stop the batch, the error is logged and the
/// call fails once every image was tried. Returns the number of headers
/// written.
pub fn generate_headers(dir: &Path, out_dir: &Path, section: &str) -> Result<usize, WorkflowErrors> {
    let images = discover_images(dir).at_stage(Stage::ReadInput)?;

    if images.is_empty() {
        warn!("No BMP or JPEG files in {:?}", dir);
        return Ok(0);
    }
    create_dir_all(out_dir).at_stage(Stage::WriteOutput)?;

    let mut written = 0;
    let mut failed = 0;

    for image in &images {
        match image_to_header(image, out_dir, section) {
            Ok(header) => {
                info!("{:?} -> {:?}", image, header);
                written += 1;
            }
            Err(err) => {
                error!("Could not convert {:?}: {:?}", image, err);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(WorkflowErrors::GenericString(format!(
            "{failed} of {} images could not be converted",
            images.len()
        )));
    }
    Ok(written)
}
