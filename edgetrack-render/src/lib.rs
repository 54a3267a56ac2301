//! edgetrack-render: Image and track rendering for edgetrack.
//!
//! Builds the three figures a run produces (the input image, the image
//! with tracks overlaid, and the tracks alone) as RGB canvases, and
//! writes them as PNG files. No axes, ticks or labels are drawn.
//!

pub mod colormap;
mod error;
pub mod plot;
mod util;

pub use colormap::Colormap;
pub use error::{Error, Result};
pub use plot::{render_image, render_overlay, render_tracks, save_png, Canvas, RenderOptions};
