//! edgetrack-pipeline: Orchestration of the external edge-tracking tools.
//!
//! A run loads the input image, optionally upsamples it with `linterp`,
//! converts it for `devernay`, runs the edge tracker, parses and filters
//! the resulting tracks, writes the simplified coordinate file and renders
//! the figures. Every external process is checked: a non-zero exit aborts
//! the run with [`ExternalToolError`].
//!

mod cleanup;
mod config;
mod error;
mod figures;
mod naming;
mod run;
pub mod tool;

pub use cleanup::IntermediateFiles;
pub use config::{DetectorParams, Interpolation, PipelineConfig, PlotFormat, ToolPaths};
pub use error::{Error, ExternalToolError, InputError, Result};
pub use figures::Figure;
pub use naming::InputName;
pub use run::{Pipeline, RunReport, RAW_OUTPUT_FILE};
pub use tool::{
    run_tool, Convert, Devernay, ExternalTool, InterpolationMethod, Linterp, ToolOutput,
    UnknownMethodError,
};
