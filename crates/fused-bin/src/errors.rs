/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};

use fused_bmp::FusedErrors;

/// Pipeline step a failure came from
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Stage {
    VerifyPaths,
    ReadInput,
    DecodeDump,
    LoadTemplate,
    EncodeBmp,
    EncodeJpeg,
    DecodeRaster,
    Fuse,
    EncodeDump,
    WriteOutput
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::VerifyPaths => "verify paths",
            Stage::ReadInput => "read input",
            Stage::DecodeDump => "decode dump",
            Stage::LoadTemplate => "load template",
            Stage::EncodeBmp => "encode bmp",
            Stage::EncodeJpeg => "encode jpeg",
            Stage::DecodeRaster => "decode raster",
            Stage::Fuse => "fuse",
            Stage::EncodeDump => "encode dump",
            Stage::WriteOutput => "write output"
        };
        f.write_str(name)
    }
}

pub enum WorkflowErrors {
    /// A stage failed with one of the conversion errors
    Failed(Stage, FusedErrors),
    /// The raster decoder could not produce grayscale pixels
    UnsupportedImage(String),
    GenericString(String)
}

impl WorkflowErrors {
    /// Stage that produced the error, if known
    pub fn stage(&self) -> Option<Stage> {
        match self {
            WorkflowErrors::Failed(stage, _) => Some(*stage),
            WorkflowErrors::UnsupportedImage(_) => Some(Stage::DecodeRaster),
            WorkflowErrors::GenericString(_) => None
        }
    }
}

impl Debug for WorkflowErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowErrors::Failed(stage, err) => {
                writeln!(f, "Stage `{stage}` failed: {}", format!("{err:?}").trim_end())
            }
            WorkflowErrors::UnsupportedImage(reason) => {
                writeln!(f, "Stage `{}` failed: {reason}", Stage::DecodeRaster)
            }
            WorkflowErrors::GenericString(reason) => {
                writeln!(f, "{reason}")
            }
        }
    }
}

impl Display for WorkflowErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for WorkflowErrors {}

impl From<String> for WorkflowErrors {
    fn from(value: String) -> Self {
        WorkflowErrors::GenericString(value)
    }
}

/// Attach the failing stage to a conversion error
pub trait AtStage<T> {
    fn at_stage(self, stage: Stage) -> Result<T, WorkflowErrors>;
}

impl<T, E: Into<FusedErrors>> AtStage<T> for Result<T, E> {
    fn at_stage(self, stage: Stage) -> Result<T, WorkflowErrors> {
        self.map_err(|err| WorkflowErrors::Failed(stage, err.into()))
    }
}
