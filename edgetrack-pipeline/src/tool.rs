//! External programs and their command lines.
//!
//! Each program is described by a small struct implementing
//! [`ExternalTool`]; [`run_tool`] executes it, captures its output and
//! turns every kind of failure into an [`ExternalToolError`].

use crate::ExternalToolError;
use edgetrack_core::InterpolationFactor;
use std::ffi::OsString;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::str::FromStr;
use thiserror::Error;

/// An external program invocation.
pub trait ExternalTool {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Program to execute.
    fn program(&self) -> &Path;

    /// Command-line arguments.
    fn args(&self) -> Vec<OsString>;

    /// File the program must leave behind on success, if any.
    fn expected_output(&self) -> Option<&Path> {
        None
    }

    /// Builds the command to spawn.
    fn command(&self) -> Command {
        let mut cmd = Command::new(self.program());
        cmd.args(self.args());
        cmd
    }
}

/// Captured result of a successful run.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit status (always a success).
    pub status: ExitStatus,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

/// Runs `tool` to completion and checks its exit status.
///
/// Blocks until the process exits. There is no timeout.
///
/// # Errors
/// Returns [`ExternalToolError::NotFound`] if the program does not exist,
/// [`ExternalToolError::Spawn`] if it cannot be started,
/// [`ExternalToolError::Failed`] on a non-zero exit and
/// [`ExternalToolError::MissingOutput`] if the expected output file is absent.
pub fn run_tool(tool: &dyn ExternalTool) -> Result<ToolOutput, ExternalToolError> {
    let mut cmd = tool.command();
    let program = tool.program().display().to_string();
    log::debug!("{}: {:?}", tool.name(), cmd);

    let output = cmd.output().map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            ExternalToolError::NotFound {
                tool: tool.name(),
                program: program.clone(),
            }
        } else {
            ExternalToolError::Spawn {
                tool: tool.name(),
                program: program.clone(),
                source,
            }
        }
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        log::error!("{} failed ({}):\n{}", tool.name(), output.status, stderr);
        return Err(ExternalToolError::Failed {
            tool: tool.name(),
            status: output.status,
            stderr: stderr.trim().to_string(),
        });
    }
    if !stderr.trim().is_empty() {
        log::warn!("{}: {}", tool.name(), stderr.trim());
    }

    if let Some(path) = tool.expected_output() {
        if !path.exists() {
            return Err(ExternalToolError::MissingOutput {
                tool: tool.name(),
                path: path.to_path_buf(),
            });
        }
    }

    Ok(ToolOutput {
        status: output.status,
        stdout,
        stderr,
    })
}

/// Sub-pixel edge tracker.
///
/// `devernay <input.pgm> -t <tracks.txt> -s <sigma> -l <low> -h <high>`
#[derive(Debug, Clone)]
pub struct Devernay {
    pub program: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
    /// Gaussian smoothing sigma.
    pub sigma: f64,
    /// Low hysteresis threshold.
    pub low: f64,
    /// High hysteresis threshold.
    pub high: f64,
}

impl ExternalTool for Devernay {
    fn name(&self) -> &'static str {
        "devernay"
    }

    fn program(&self) -> &Path {
        &self.program
    }

    fn args(&self) -> Vec<OsString> {
        vec![
            self.input.clone().into_os_string(),
            "-t".into(),
            self.output.clone().into_os_string(),
            "-s".into(),
            self.sigma.to_string().into(),
            "-l".into(),
            self.low.to_string().into(),
            "-h".into(),
            self.high.to_string().into(),
        ]
    }

    fn expected_output(&self) -> Option<&Path> {
        Some(&self.output)
    }
}

/// Image interpolation.
///
/// `linterp <input> <output> -m <method> -x <factor>`
#[derive(Debug, Clone)]
pub struct Linterp {
    pub program: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
    pub method: InterpolationMethod,
    pub factor: InterpolationFactor,
}

impl ExternalTool for Linterp {
    fn name(&self) -> &'static str {
        "linterp"
    }

    fn program(&self) -> &Path {
        &self.program
    }

    fn args(&self) -> Vec<OsString> {
        vec![
            self.input.clone().into_os_string(),
            self.output.clone().into_os_string(),
            "-m".into(),
            self.method.as_str().into(),
            "-x".into(),
            self.factor.to_string().into(),
        ]
    }

    fn expected_output(&self) -> Option<&Path> {
        Some(&self.output)
    }
}

/// Image format conversion; the format follows from the file extensions.
///
/// `convert <input> <output>`
#[derive(Debug, Clone)]
pub struct Convert {
    pub program: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl ExternalTool for Convert {
    fn name(&self) -> &'static str {
        "convert"
    }

    fn program(&self) -> &Path {
        &self.program
    }

    fn args(&self) -> Vec<OsString> {
        vec![
            self.input.clone().into_os_string(),
            self.output.clone().into_os_string(),
        ]
    }

    fn expected_output(&self) -> Option<&Path> {
        Some(&self.output)
    }
}

/// Interpolation kernels understood by `linterp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterpolationMethod {
    Nearest,
    Bilinear,
    Bicubic,
    Fourier,
    Lanczos2,
    Lanczos3,
    Lanczos4,
    Bspline2,
    Bspline3,
    Bspline5,
    Bspline7,
    Bspline9,
    Bspline11,
    Omoms3,
    Omoms5,
    Omoms7,
}

impl InterpolationMethod {
    /// Every supported kernel.
    pub const ALL: [Self; 16] = [
        Self::Nearest,
        Self::Bilinear,
        Self::Bicubic,
        Self::Fourier,
        Self::Lanczos2,
        Self::Lanczos3,
        Self::Lanczos4,
        Self::Bspline2,
        Self::Bspline3,
        Self::Bspline5,
        Self::Bspline7,
        Self::Bspline9,
        Self::Bspline11,
        Self::Omoms3,
        Self::Omoms5,
        Self::Omoms7,
    ];

    /// Name passed to `linterp -m`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Bilinear => "bilinear",
            Self::Bicubic => "bicubic",
            Self::Fourier => "fourier",
            Self::Lanczos2 => "lanczos2",
            Self::Lanczos3 => "lanczos3",
            Self::Lanczos4 => "lanczos4",
            Self::Bspline2 => "bspline2",
            Self::Bspline3 => "bspline3",
            Self::Bspline5 => "bspline5",
            Self::Bspline7 => "bspline7",
            Self::Bspline9 => "bspline9",
            Self::Bspline11 => "bspline11",
            Self::Omoms3 => "omoms3",
            Self::Omoms5 => "omoms5",
            Self::Omoms7 => "omoms7",
        }
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized interpolation kernel name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown interpolation method {name:?} (expected one of: {})", valid_methods())]
pub struct UnknownMethodError {
    pub name: String,
}

fn valid_methods() -> String {
    InterpolationMethod::ALL
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for InterpolationMethod {
    type Err = UnknownMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| UnknownMethodError {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_devernay_command_line() {
        let tool = Devernay {
            program: "devernay".into(),
            input: "img_copy.pgm".into(),
            output: "output_intermediate.txt".into(),
            sigma: 1.5,
            low: 8.0,
            high: 12.0,
        };
        assert_eq!(
            strings(tool.args()),
            vec![
                "img_copy.pgm",
                "-t",
                "output_intermediate.txt",
                "-s",
                "1.5",
                "-l",
                "8",
                "-h",
                "12"
            ]
        );
        assert_eq!(
            tool.expected_output(),
            Some(Path::new("output_intermediate.txt"))
        );
    }

    #[test]
    fn test_linterp_command_line() {
        let tool = Linterp {
            program: "/opt/linterp".into(),
            input: "a_converted.png".into(),
            output: "a_inter.png".into(),
            method: InterpolationMethod::Bspline3,
            factor: InterpolationFactor::new(4).unwrap(),
        };
        assert_eq!(
            strings(tool.args()),
            vec!["a_converted.png", "a_inter.png", "-m", "bspline3", "-x", "4"]
        );
        assert_eq!(tool.command().get_program(), "/opt/linterp");
    }

    #[test]
    fn test_method_names_round_trip() {
        for method in InterpolationMethod::ALL {
            assert_eq!(method.as_str().parse::<InterpolationMethod>(), Ok(method));
        }
        assert_eq!(
            "Lanczos3".parse::<InterpolationMethod>(),
            Ok(InterpolationMethod::Lanczos3)
        );
        let err = "sinc".parse::<InterpolationMethod>().unwrap_err();
        assert!(err.to_string().contains("omoms3"));
    }

    #[test]
    fn test_missing_program() {
        let tool = Convert {
            program: "/nonexistent/edgetrack-test-convert".into(),
            input: "a.png".into(),
            output: "b.pgm".into(),
        };
        let err = run_tool(&tool).unwrap_err();
        assert!(matches!(err, ExternalToolError::NotFound { tool: "convert", .. }));
    }

    #[cfg(unix)]
    struct Shell {
        script: &'static str,
        output: Option<PathBuf>,
    }

    #[cfg(unix)]
    impl ExternalTool for Shell {
        fn name(&self) -> &'static str {
            "shell"
        }

        fn program(&self) -> &Path {
            Path::new("sh")
        }

        fn args(&self) -> Vec<OsString> {
            vec!["-c".into(), self.script.into()]
        }

        fn expected_output(&self) -> Option<&Path> {
            self.output.as_deref()
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_reported_with_stderr() {
        let tool = Shell {
            script: "echo 'cannot open image' >&2; exit 3",
            output: None,
        };
        match run_tool(&tool).unwrap_err() {
            ExternalToolError::Failed {
                tool,
                status,
                stderr,
            } => {
                assert_eq!(tool, "shell");
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "cannot open image");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_success_captures_stdout() {
        let tool = Shell {
            script: "echo done",
            output: None,
        };
        let out = run_tool(&tool).unwrap();
        assert!(out.status.success());
        assert_eq!(out.stdout.trim(), "done");
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let tool = Shell {
            script: "exit 0",
            output: Some(dir.path().join("never-written.txt")),
        };
        let err = run_tool(&tool).unwrap_err();
        assert!(matches!(err, ExternalToolError::MissingOutput { .. }));
        assert_eq!(err.tool(), "shell");
    }
}
