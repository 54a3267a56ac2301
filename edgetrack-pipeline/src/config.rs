//! Run configuration.

use crate::tool::InterpolationMethod;
use edgetrack_core::{Error as CoreError, InterpolationFactor};
use edgetrack_render::RenderOptions;
use std::path::{Path, PathBuf};

/// Upsampling applied before edge detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interpolation {
    /// Kernel passed to `linterp`.
    pub method: InterpolationMethod,
    /// Integer upsampling ratio.
    pub factor: InterpolationFactor,
}

/// Edge tracker parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorParams {
    /// Gaussian smoothing sigma.
    pub sigma: f64,
    /// Low hysteresis threshold.
    pub low: f64,
    /// High hysteresis threshold.
    pub high: f64,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            low: 8.0,
            high: 12.0,
        }
    }
}

/// Locations of the external programs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub devernay: PathBuf,
    pub linterp: PathBuf,
    pub convert: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            devernay: PathBuf::from("devernay"),
            linterp: PathBuf::from("linterp"),
            convert: PathBuf::from("convert"),
        }
    }
}

/// File format of the rendered figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotFormat {
    /// PDF, produced by converting a rendered PNG.
    #[default]
    Pdf,
    /// PNG, written directly.
    Png,
}

impl PlotFormat {
    /// File extension without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Png => "png",
        }
    }
}

/// Parameters for one run. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Input image.
    pub input: PathBuf,
    /// Optional upsampling step.
    pub interpolation: Option<Interpolation>,
    /// Edge tracker parameters.
    pub detector: DetectorParams,
    /// Tracks with this many points or fewer are discarded.
    pub min_track_length: usize,
    /// Directory receiving outputs and intermediates.
    pub output_dir: PathBuf,
    /// External program locations.
    pub tools: ToolPaths,
    /// Figure file format.
    pub plot_format: PlotFormat,
    /// Leave intermediate files in place.
    pub keep_intermediates: bool,
    /// Figure appearance.
    pub render: RenderOptions,
}

impl PipelineConfig {
    /// Creates a configuration with default values for `input`.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            interpolation: None,
            detector: DetectorParams::default(),
            min_track_length: 10,
            output_dir: PathBuf::from("."),
            tools: ToolPaths::default(),
            plot_format: PlotFormat::default(),
            keep_intermediates: false,
            render: RenderOptions::default(),
        }
    }

    /// Enables interpolation.
    #[must_use]
    pub fn with_interpolation(
        mut self,
        method: InterpolationMethod,
        factor: InterpolationFactor,
    ) -> Self {
        self.interpolation = Some(Interpolation { method, factor });
        self
    }

    /// Sets the edge tracker parameters.
    #[must_use]
    pub fn with_detector(mut self, detector: DetectorParams) -> Self {
        self.detector = detector;
        self
    }

    /// Sets the minimum track length.
    #[must_use]
    pub fn with_min_track_length(mut self, length: usize) -> Self {
        self.min_track_length = length;
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the external program locations.
    #[must_use]
    pub fn with_tools(mut self, tools: ToolPaths) -> Self {
        self.tools = tools;
        self
    }

    /// Sets the figure format.
    #[must_use]
    pub fn with_plot_format(mut self, format: PlotFormat) -> Self {
        self.plot_format = format;
        self
    }

    /// Keeps intermediate files.
    #[must_use]
    pub fn with_keep_intermediates(mut self, keep: bool) -> Self {
        self.keep_intermediates = keep;
        self
    }

    /// Sets the figure appearance.
    #[must_use]
    pub fn with_render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    /// Factor used to map coordinates back to the input grid.
    #[must_use]
    pub fn factor(&self) -> InterpolationFactor {
        self.interpolation
            .map_or(InterpolationFactor::ONE, |i| i.factor)
    }

    /// Output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Checks the numeric parameters.
    ///
    /// # Errors
    /// Returns a configuration error for non-finite thresholds or a
    /// negative sigma.
    pub fn validate(&self) -> Result<(), CoreError> {
        let DetectorParams { sigma, low, high } = self.detector;
        if !(sigma.is_finite() && sigma >= 0.0) {
            return Err(CoreError::ConfigError(format!(
                "sigma must be a non-negative number, got {sigma}"
            )));
        }
        if !(low.is_finite() && high.is_finite()) {
            return Err(CoreError::ConfigError(format!(
                "thresholds must be finite, got l={low} h={high}"
            )));
        }
        Ok(())
    }
}
