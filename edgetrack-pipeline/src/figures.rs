//! Writing rendered figures in the configured format.

use crate::cleanup::IntermediateFiles;
use crate::config::{PipelineConfig, PlotFormat};
use crate::tool::{run_tool, Convert};
use crate::Result;
use edgetrack_render::{save_png, Canvas};
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The figures a run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Figure {
    /// The input image alone.
    Input,
    /// The image with tracks overlaid, or alone when no track was found.
    Output,
    /// The tracks alone.
    Tracks,
}

impl Figure {
    /// Every figure, in the order a run writes them.
    pub const ALL: [Self; 3] = [Self::Input, Self::Output, Self::Tracks];

    /// File stem of the figure.
    #[must_use]
    pub fn stem(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Tracks => "tracks",
        }
    }

    /// File name of the figure in `format`.
    #[must_use]
    pub fn file_name(self, format: PlotFormat) -> String {
        format!("{}.{}", self.stem(), format.extension())
    }

    /// Temporary raster converted into a PDF figure.
    pub(crate) fn raster_name(self) -> String {
        format!("{}_figure.png", self.stem())
    }
}

/// Saves `canvas` as `figure` into the output directory.
///
/// PNG figures are encoded directly. PDF figures are encoded as a
/// temporary PNG and converted with the configured `convert` program.
pub(crate) fn save_figure(
    config: &PipelineConfig,
    canvas: &Canvas,
    figure: Figure,
) -> Result<PathBuf> {
    let dir = config.output_dir();
    let target = dir.join(figure.file_name(config.plot_format));
    match config.plot_format {
        PlotFormat::Png => save_png(canvas, &target)?,
        PlotFormat::Pdf => {
            let mut files = IntermediateFiles::new(config.keep_intermediates);
            let raster = files.register(dir.join(figure.raster_name()));
            save_png(canvas, &raster)?;
            run_tool(&Convert {
                program: config.tools.convert.clone(),
                input: raster,
                output: target.clone(),
            })?;
        }
    }
    log::info!("wrote {}", target.display());
    Ok(target)
}
