//! Error types for edgetrack-core.

use thiserror::Error;

/// Result type alias for edgetrack operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for edgetrack operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Interpolation factor outside the accepted range.
    #[error("invalid interpolation factor: {0} (must be >= 1)")]
    InvalidFactor(u32),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
