//! I/O error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed row in a coordinate file.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Input image could not be decoded.
    #[error("cannot read image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Invalid file format.
    #[error("invalid file format: {0}")]
    InvalidFormat(String),
}
