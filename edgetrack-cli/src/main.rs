//! Command-line entry point for edgetrack.
//!
//! Runs the full detection pipeline on one image and reports the number
//! of tracks found.
#![allow(clippy::uninlined_format_args)]

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};
use edgetrack_core::InterpolationFactor;
use edgetrack_pipeline::{
    DetectorParams, InterpolationMethod, Pipeline, PipelineConfig, PlotFormat, RunReport,
    ToolPaths,
};
use edgetrack_render::{Colormap, RenderOptions};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Pipeline(#[from] edgetrack_pipeline::Error),

    #[error("Core error: {0}")]
    Core(#[from] edgetrack_core::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Figure file format.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// PDF via the image converter
    Pdf,
    /// PNG written directly
    Png,
}

/// Colormap for the image figures.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Cmap {
    Viridis,
    Gray,
    Hot,
}

/// Particle-track detection with the devernay sub-pixel edge tracker.
#[derive(Parser, Debug)]
#[command(name = "edgetrack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input image
    #[arg(long)]
    input: PathBuf,

    /// Upsample the image with linterp before edge tracking
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    interp: bool,

    /// Interpolation kernel (required with --interp)
    #[arg(long = "interp_method")]
    interp_method: Option<InterpolationMethod>,

    /// Integer upsampling factor (required with --interp)
    #[arg(long = "interp_fact", value_parser = clap::value_parser!(u32).range(1..))]
    interp_fact: Option<u32>,

    /// Gaussian smoothing sigma for edge tracking
    #[arg(long, default_value = "1")]
    sigma: f64,

    /// Low threshold for edge tracking
    #[arg(long = "l", default_value = "8")]
    low: f64,

    /// High threshold for edge tracking
    #[arg(long = "h", default_value = "12")]
    high: f64,

    /// Tracks with this many points or fewer are discarded
    #[arg(long = "min_track_length", default_value = "10")]
    min_track_length: usize,

    /// Directory for outputs and intermediate files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// devernay executable
    #[arg(long, default_value = "devernay")]
    devernay: PathBuf,

    /// linterp executable
    #[arg(long, default_value = "linterp")]
    linterp: PathBuf,

    /// Image converter executable
    #[arg(long, default_value = "convert")]
    convert: PathBuf,

    /// Figure file format
    #[arg(long, value_enum, default_value = "pdf")]
    plot_format: Format,

    /// Colormap for the image figures
    #[arg(long, value_enum, default_value = "viridis")]
    colormap: Cmap,

    /// Keep intermediate files
    #[arg(long)]
    keep_intermediates: bool,

    /// Write a JSON run summary to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Verbose output (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> Result<PipelineConfig> {
        let format = match self.plot_format {
            Format::Pdf => PlotFormat::Pdf,
            Format::Png => PlotFormat::Png,
        };
        let colormap = match self.colormap {
            Cmap::Viridis => Colormap::Viridis,
            Cmap::Gray => Colormap::Grayscale,
            Cmap::Hot => Colormap::Hot,
        };

        let mut config = PipelineConfig::new(self.input)
            .with_detector(DetectorParams {
                sigma: self.sigma,
                low: self.low,
                high: self.high,
            })
            .with_min_track_length(self.min_track_length)
            .with_output_dir(self.output_dir)
            .with_tools(ToolPaths {
                devernay: self.devernay,
                linterp: self.linterp,
                convert: self.convert,
            })
            .with_plot_format(format)
            .with_keep_intermediates(self.keep_intermediates)
            .with_render(RenderOptions::new().with_colormap(colormap));

        if self.interp {
            let method = self.interp_method.ok_or_else(|| {
                edgetrack_core::Error::ConfigError("--interp requires --interp_method".into())
            })?;
            let fact = self.interp_fact.ok_or_else(|| {
                edgetrack_core::Error::ConfigError("--interp requires --interp_fact".into())
            })?;
            config = config.with_interpolation(method, InterpolationFactor::new(fact)?);
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn write_summary(path: &Path, report: &RunReport) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, report)?;
    log::info!("wrote summary to {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let summary = cli.summary.clone();

    let pipeline = Pipeline::new(cli.into_config()?);
    let config = pipeline.config();
    log::info!("input: {}", config.input.display());
    if let Some(interp) = config.interpolation {
        log::info!("interpolation: {} x{}", interp.method, interp.factor);
    }
    log::info!("min track length: {}", config.min_track_length);

    let report = pipeline.run()?;

    if let Some(path) = summary {
        write_summary(&path, &report)?;
    }

    println!("The number of tracks found is: {}", report.track_count);

    Ok(())
}
