/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::builder::PossibleValue;
use clap::{value_parser, Arg, ArgAction, Command, ValueEnum};
use fused_bmp::RowOrder;

use crate::c_header::DEFAULT_SECTION;
use crate::cmd_args::help_strings::{
    FUSE_ABOUT, HEADER_ABOUT, PAD_ROWS_HELP, QUALITY_HELP, ROW_ORDER_HELP, TEMPLATE_HELP
};

pub mod help_strings;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RowOrderArg {
    AsStored,
    BottomUp
}

impl RowOrderArg {
    pub const fn to_row_order(self) -> RowOrder {
        match self {
            RowOrderArg::AsStored => RowOrder::AsStored,
            RowOrderArg::BottomUp => RowOrder::BottomUp
        }
    }
}

impl ValueEnum for RowOrderArg {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::AsStored, Self::BottomUp]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::AsStored => PossibleValue::new("as-stored"),
            Self::BottomUp => PossibleValue::new("bottom-up")
        })
    }
}

fn input_arg() -> Arg {
    Arg::new("in")
        .short('i')
        .long("input")
        .help("Fused image dump to read data from")
        .action(ArgAction::Append)
        .value_parser(value_parser!(PathBuf))
        .required(true)
}

fn output_arg() -> Arg {
    Arg::new("out")
        .short('o')
        .long("output")
        .help("Output to write the data to, paired with inputs in order")
        .action(ArgAction::Append)
        .value_parser(value_parser!(PathBuf))
        .required(true)
}

#[rustfmt::skip]
fn bmp_command() -> Command {
    Command::new("bmp")
        .about("Convert fused dumps to 8-bit grayscale BMP files")
        .arg(input_arg())
        .arg(output_arg())
        .arg(Arg::new("template")
            .short('t')
            .long("template")
            .help("BMP file whose header is reused")
            .long_help(TEMPLATE_HELP)
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("header-size")
            .long("header-size")
            .help_heading("ADVANCED")
            .help("Number of template bytes used as header")
            .default_value("54")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("row-order")
            .long("row-order")
            .help_heading("LAYOUT")
            .help("Order of rows in the BMP pixel array")
            .long_help(ROW_ORDER_HELP)
            .default_value("as-stored")
            .value_parser(value_parser!(RowOrderArg)))
        .arg(Arg::new("pad-rows")
            .long("pad-rows")
            .help_heading("LAYOUT")
            .action(ArgAction::SetTrue)
            .help("Pad each row to a multiple of 4 bytes")
            .long_help(PAD_ROWS_HELP))
}

#[rustfmt::skip]
fn jpeg_command() -> Command {
    Command::new("jpeg")
        .alias("jpg")
        .about("Convert fused dumps to grayscale JPEG files")
        .arg(input_arg())
        .arg(output_arg())
        .arg(Arg::new("quality")
            .short('q')
            .long("quality")
            .help("JPEG quality, between 0 and 100")
            .long_help(QUALITY_HELP)
            .default_value("95")
            .value_parser(value_parser!(u8).range(0..=100)))
}

#[rustfmt::skip]
fn header_command() -> Command {
    Command::new("header")
        .about("Generate C headers from BMP and JPEG images")
        .long_about(HEADER_ABOUT)
        .arg(Arg::new("dir")
            .long("dir")
            .help("Directory to search for images")
            .default_value("Images")
            .value_parser(value_parser!(PathBuf)))
        .arg(Arg::new("out-dir")
            .long("out-dir")
            .help("Directory the headers are written to")
            .default_value(".")
            .value_parser(value_parser!(PathBuf)))
        .arg(Arg::new("section")
            .long("section")
            .help("Linker section for the pixel array")
            .default_value(DEFAULT_SECTION))
}

#[rustfmt::skip]
fn fuse_command() -> Command {
    Command::new("fuse")
        .about("Fuse two grayscale exposures into a dump")
        .long_about(FUSE_ABOUT)
        .arg(Arg::new("first")
            .short('a')
            .long("first")
            .help("First BMP or JPEG image")
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("second")
            .short('b')
            .long("second")
            .help("Second BMP or JPEG image, same dimensions as the first")
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("out")
            .short('o')
            .long("output")
            .help("Fused dump to write")
            .value_parser(value_parser!(PathBuf))
            .required(true))
}

#[rustfmt::skip]
fn probe_command() -> Command {
    Command::new("probe")
        .about("Print dump dimensions and completeness as JSON")
        .arg(input_arg())
}

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("fused-image")
        .about("Fuse grayscale exposures and convert fused dumps for viewing and firmware linkage")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(bmp_command())
        .subcommand(jpeg_command())
        .subcommand(header_command())
        .subcommand(fuse_command())
        .subcommand(probe_command())
        .arg(Arg::new("all-yes")
            .short('y')
            .long("all-yes")
            .global(true)
            .action(ArgAction::SetTrue)
            .help("Overwrite existing outputs without asking"))
        .arg(Arg::new("debug")
            .long("debug")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the conversion"))
}
