/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Command line front end for fused image dumps
//!
//! Converts dumps to BMP or JPEG, probes them, and turns BMP and JPEG images
//! into C headers for firmware. The conversion steps are public so they can be
//! driven without going through the command line.
use std::process::exit;

use log::error;

use crate::workflow::create_and_exec_workflow_from_cmd;

pub mod c_header;
mod cmd_args;
mod cmd_parsers;
pub mod discover;
pub mod errors;
pub mod file_io;
pub mod jpeg;
pub mod probe_files;
pub mod raster;
mod serde;
pub mod workflow;

pub fn main() {
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches();

    cmd_parsers::global_options::setup_logger(&options);

    let parsed_opts = cmd_parsers::global_options::parse_options(&options);

    if let Err(err) = create_and_exec_workflow_from_cmd(&options, &parsed_opts) {
        println!();
        error!(" Could not complete workflow, reason {:?}", err);
        println!();
        exit(-1);
    }
}
