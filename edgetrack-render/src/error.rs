//! Rendering error types.

use thiserror::Error;

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Rendering error types.
#[derive(Error, Debug)]
pub enum Error {
    /// The image to render has no pixels.
    #[error("cannot render an empty image ({rows}x{cols})")]
    EmptyImage { rows: usize, cols: usize },

    /// Encoding the canvas failed.
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}
