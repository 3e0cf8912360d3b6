/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::ArgMatches;
use fused_bmp::{BmpOptions, BMP_HEADER_SIZE};

use crate::cmd_args::RowOrderArg;
use crate::errors::WorkflowErrors;

pub mod global_options;

/// Pair `-i` and `-o` values in the order they were given
pub fn paired_paths(options: &ArgMatches) -> Result<Vec<(PathBuf, PathBuf)>, WorkflowErrors> {
    let inputs: Vec<PathBuf> = options
        .get_many::<PathBuf>("in")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();
    let outputs: Vec<PathBuf> = options
        .get_many::<PathBuf>("out")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();

    if inputs.len() != outputs.len() {
        return Err(WorkflowErrors::GenericString(format!(
            "Got {} inputs but {} outputs, each input needs one output",
            inputs.len(),
            outputs.len()
        )));
    }
    Ok(inputs.into_iter().zip(outputs).collect())
}

/// Number of template bytes the `bmp` subcommand treats as header
pub fn get_header_size(options: &ArgMatches) -> usize {
    options
        .get_one::<usize>("header-size")
        .copied()
        .unwrap_or(BMP_HEADER_SIZE)
}

/// Build BMP layout options from the `bmp` subcommand
pub fn get_bmp_options(options: &ArgMatches) -> BmpOptions {
    let row_order = options
        .get_one::<RowOrderArg>("row-order")
        .copied()
        .unwrap_or(RowOrderArg::AsStored);

    BmpOptions::default()
        .set_row_order(row_order.to_row_order())
        .set_pad_rows(options.get_flag("pad-rows"))
}

#[cfg(test)]
mod tests {
    use fused_bmp::RowOrder;

    use super::*;
    use crate::cmd_args::create_cmd_args;

    fn sub_matches(args: &[&str]) -> ArgMatches {
        let matches = create_cmd_args().try_get_matches_from(args).unwrap();
        matches.subcommand().unwrap().1.clone()
    }

    #[test]
    fn pairs_inputs_with_outputs() {
        let args = sub_matches(&[
            "fused-image", "jpeg", "-i", "a.bin", "-o", "a.jpg", "-i", "b.bin", "-o", "b.jpg"
        ]);
        let pairs = paired_paths(&args).unwrap();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1], (PathBuf::from("b.bin"), PathBuf::from("b.jpg")));
    }

    #[test]
    fn unbalanced_outputs_are_rejected() {
        let args = sub_matches(&["fused-image", "jpeg", "-i", "a.bin", "-i", "b.bin", "-o", "a.jpg"]);
        assert!(paired_paths(&args).is_err());
    }

    #[test]
    fn bmp_layout_flags() {
        let args = sub_matches(&[
            "fused-image", "bmp", "-i", "a.bin", "-o", "a.bmp", "-t", "t.bmp",
            "--row-order", "bottom-up", "--pad-rows", "--header-size", "60"
        ]);
        let options = get_bmp_options(&args);

        assert_eq!(options.row_order(), RowOrder::BottomUp);
        assert!(options.pad_rows());
        assert_eq!(get_header_size(&args), 60);
    }
}
