//! The track-finding run.

use crate::cleanup::IntermediateFiles;
use crate::config::{Interpolation, PipelineConfig, PlotFormat};
use crate::figures::{save_figure, Figure};
use crate::naming::InputName;
use crate::tool::{run_tool, Convert, Devernay, Linterp};
use crate::{InputError, Result};
use edgetrack_core::{InterpolationFactor, TrackCollection};
use edgetrack_io::{load_image, output_file_name, read_tracks, write_tracks, ImageData};
use edgetrack_render::{render_image, render_overlay, render_tracks};
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Name of the edge tracker's raw output inside the output directory.
pub const RAW_OUTPUT_FILE: &str = "output_intermediate.txt";

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunReport {
    /// Number of accepted tracks.
    pub track_count: usize,
    /// Point count of each accepted track, in ID order.
    pub track_lengths: Vec<usize>,
    /// Factor the coordinates were divided by.
    pub interpolation_factor: InterpolationFactor,
    /// Simplified coordinate file.
    pub coordinate_file: PathBuf,
    /// Figures written, in the order they were produced.
    pub figures: Vec<(Figure, PathBuf)>,
    /// Accepted tracks on the input image's pixel grid.
    pub tracks: TrackCollection,
}

/// Runs the detection pipeline for one configuration.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Creates a pipeline for `config`.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Executes the run.
    ///
    /// The input is validated and loaded before any external program is
    /// started. Intermediate files of each phase are removed when the phase
    /// ends, on success and on failure.
    ///
    /// # Errors
    /// Returns [`crate::Error::Input`] for a missing or unreadable input,
    /// [`crate::Error::Tool`] if an external program fails,
    /// [`crate::Error::Data`] if the edge tracker's output is malformed, and
    /// I/O or rendering errors otherwise.
    pub fn run(&self) -> Result<RunReport> {
        let config = &self.config;
        config.validate()?;

        let input = InputName::parse(&config.input)?;
        if !config.input.is_file() {
            return Err(InputError::NotFound(config.input.clone()).into());
        }
        self.ensure_input_survives(&input)?;
        let data = load_image(&config.input).map_err(InputError::Unreadable)?;
        fs::create_dir_all(config.output_dir())?;

        let mut figures = Vec::with_capacity(3);
        let canvas = render_image(&data, &config.render)?;
        figures.push((Figure::Input, save_figure(config, &canvas, Figure::Input)?));

        let factor = config.factor();
        let raw_tracks = match config.interpolation {
            Some(interpolation) => {
                let mut files = IntermediateFiles::new(config.keep_intermediates);
                let upsampled = self.interpolate(&input, interpolation, &mut files)?;
                self.detect(&upsampled)?
            }
            None => self.detect(&config.input)?,
        };
        log::info!("{} tracks accepted", raw_tracks.len());

        let coordinate_file = write_tracks(config.output_dir(), &raw_tracks, factor)?;
        let tracks = raw_tracks.rescaled(factor);
        figures.extend(self.render_results(&data, &tracks)?);

        Ok(RunReport {
            track_count: tracks.len(),
            track_lengths: tracks.lengths(),
            interpolation_factor: factor,
            coordinate_file,
            figures,
            tracks,
        })
    }

    /// Names of every file the run creates in the output directory.
    fn planned_files(&self, input: &InputName) -> Result<Vec<String>> {
        let config = &self.config;
        let mut names: Vec<String> = Figure::ALL
            .into_iter()
            .map(|f| f.file_name(config.plot_format))
            .collect();
        if config.plot_format == PlotFormat::Pdf {
            names.extend(Figure::ALL.into_iter().map(Figure::raster_name));
        }
        names.push(output_file_name(config.factor()).to_string());
        names.push(RAW_OUTPUT_FILE.to_string());

        let detected = if config.interpolation.is_some() {
            names.push(input.converted_png_name());
            names.push(input.interpolated_name());
            InputName::parse(Path::new(&input.interpolated_name()))?
        } else {
            input.clone()
        };
        names.push(detected.copy_name());
        names.push(detected.pgm_name());
        Ok(names)
    }

    /// Fails if any file the run creates resolves to the input image.
    fn ensure_input_survives(&self, input: &InputName) -> Result<()> {
        let config = &self.config;
        // A directory that does not exist yet cannot hold the input.
        let Ok(dir) = config.output_dir().canonicalize() else {
            return Ok(());
        };
        let source = config.input.canonicalize()?;
        if self
            .planned_files(input)?
            .iter()
            .any(|name| dir.join(name) == source)
        {
            return Err(InputError::WouldOverwrite(config.input.clone()).into());
        }
        Ok(())
    }

    /// Converts the input to PNG and upsamples it. Returns the upsampled image.
    fn interpolate(
        &self,
        input: &InputName,
        interpolation: Interpolation,
        files: &mut IntermediateFiles,
    ) -> Result<PathBuf> {
        let config = &self.config;
        let dir = config.output_dir();
        let png = files.register(dir.join(input.converted_png_name()));
        let upsampled = files.register(dir.join(input.interpolated_name()));

        log::info!(
            "interpolating {} ({} x{})",
            config.input.display(),
            interpolation.method,
            interpolation.factor
        );
        run_tool(&Convert {
            program: config.tools.convert.clone(),
            input: config.input.clone(),
            output: png.clone(),
        })?;
        run_tool(&Linterp {
            program: config.tools.linterp.clone(),
            input: png,
            output: upsampled.clone(),
            method: interpolation.method,
            factor: interpolation.factor,
        })?;
        Ok(upsampled)
    }

    /// Runs the edge tracker on `image` and returns the accepted tracks,
    /// in the coordinates of `image`.
    fn detect(&self, image: &Path) -> Result<TrackCollection> {
        let config = &self.config;
        let dir = config.output_dir();
        let name = InputName::parse(image)?;

        let mut files = IntermediateFiles::new(config.keep_intermediates);
        let copy = files.register(dir.join(name.copy_name()));
        let pgm = files.register(dir.join(name.pgm_name()));
        let raw = files.register(dir.join(RAW_OUTPUT_FILE));

        // A stale file from an earlier run must not pass for fresh output.
        if raw.exists() {
            fs::remove_file(&raw)?;
        }

        fs::copy(image, &copy)?;
        if copy != pgm {
            run_tool(&Convert {
                program: config.tools.convert.clone(),
                input: copy.clone(),
                output: pgm.clone(),
            })?;
        }

        let params = config.detector;
        log::info!(
            "tracking edges in {} (sigma={}, l={}, h={})",
            image.display(),
            params.sigma,
            params.low,
            params.high
        );
        run_tool(&Devernay {
            program: config.tools.devernay.clone(),
            input: pgm,
            output: raw.clone(),
            sigma: params.sigma,
            low: params.low,
            high: params.high,
        })?;

        Ok(read_tracks(&raw, config.min_track_length)?)
    }

    /// Writes the overlay and track-only figures.
    fn render_results(
        &self,
        data: &ImageData,
        tracks: &TrackCollection,
    ) -> Result<Vec<(Figure, PathBuf)>> {
        let config = &self.config;
        let mut figures = Vec::with_capacity(2);

        if tracks.is_empty() {
            let canvas = render_image(data, &config.render)?;
            figures.push((Figure::Output, save_figure(config, &canvas, Figure::Output)?));
            return Ok(figures);
        }

        let overlay = render_overlay(data, tracks, &config.render)?;
        figures.push((Figure::Output, save_figure(config, &overlay, Figure::Output)?));
        let alone = render_tracks(tracks, &config.render);
        figures.push((Figure::Tracks, save_figure(config, &alone, Figure::Tracks)?));
        Ok(figures)
    }
}
