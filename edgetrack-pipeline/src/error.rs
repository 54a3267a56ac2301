//! Pipeline error types.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Problems with the input image, detected before any process runs.
#[derive(Error, Debug)]
pub enum InputError {
    /// The input path does not exist or is not a file.
    #[error("input image not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input path has no usable file stem.
    #[error("input path has no file name: {}", .0.display())]
    MissingStem(PathBuf),

    /// The input file name has no extension to split off.
    #[error("input file has no extension: {}", .0.display())]
    MissingExtension(PathBuf),

    /// The input file name is not valid UTF-8.
    #[error("input file name is not valid UTF-8: {}", .0.display())]
    NonUtf8(PathBuf),

    /// The image could not be decoded.
    #[error("input image unreadable: {0}")]
    Unreadable(#[source] edgetrack_io::Error),

    /// A file the run writes would replace the input image.
    #[error("input image {} would be overwritten by this run's output", .0.display())]
    WouldOverwrite(PathBuf),
}

/// Failures of an external program.
#[derive(Error, Debug)]
pub enum ExternalToolError {
    /// The program could not be found.
    #[error("{tool}: program `{program}` not found")]
    NotFound { tool: &'static str, program: String },

    /// The program could not be started.
    #[error("{tool}: failed to start `{program}`: {source}")]
    Spawn {
        tool: &'static str,
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program exited unsuccessfully.
    #[error("{tool} exited with {status}: {stderr}")]
    Failed {
        tool: &'static str,
        status: ExitStatus,
        stderr: String,
    },

    /// The program exited successfully without writing its output.
    #[error("{tool} did not produce {}", path.display())]
    MissingOutput { tool: &'static str, path: PathBuf },
}

impl ExternalToolError {
    /// Name of the tool that failed.
    #[must_use]
    pub fn tool(&self) -> &'static str {
        match self {
            Self::NotFound { tool, .. }
            | Self::Spawn { tool, .. }
            | Self::Failed { tool, .. }
            | Self::MissingOutput { tool, .. } => tool,
        }
    }
}

/// Pipeline error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input image.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// External program failure.
    #[error("external tool error: {0}")]
    Tool(#[from] ExternalToolError),

    /// Coordinate file error (malformed detector output included).
    #[error("{0}")]
    Data(#[from] edgetrack_io::Error),

    /// Figure rendering error.
    #[error("render error: {0}")]
    Render(#[from] edgetrack_render::Error),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Core library error.
    #[error("core error: {0}")]
    Core(#[from] edgetrack_core::Error),
}
