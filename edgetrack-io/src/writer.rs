//! Writer for simplified coordinate files.

use crate::Result;
use edgetrack_core::{InterpolationFactor, RawRecord, TrackCollection};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output file name when no interpolation was applied.
pub const OUTPUT_FILE: &str = "output.txt";

/// Output file name when coordinates were rescaled from an upsampled image.
pub const INTERPOLATED_OUTPUT_FILE: &str = "output_inter.txt";

/// Returns the coordinate file name for the given interpolation factor.
#[must_use]
pub fn output_file_name(factor: InterpolationFactor) -> &'static str {
    if factor.get() > 1 {
        INTERPOLATED_OUTPUT_FILE
    } else {
        OUTPUT_FILE
    }
}

/// Formats a value the way the detector's table files are written:
/// 18 fractional digits, signed two-digit exponent.
fn format_value(value: f64) -> String {
    let formatted = format!("{value:.18e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exp: i32 = exponent.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        None => formatted.to_lowercase(),
    }
}

/// Writer for two-column coordinate files.
///
/// Produces the same row shape the edge detector emits, so a written file
/// can be read back with [`crate::read_raw_records`].
pub struct CoordinateFileWriter {
    writer: BufWriter<File>,
}

impl CoordinateFileWriter {
    /// Creates a new file writer.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        Ok(Self { writer })
    }

    /// Writes one `x y` row per record.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_records(&mut self, records: &[RawRecord]) -> Result<()> {
        for r in records {
            writeln!(self.writer, "{} {}", format_value(r.x), format_value(r.y))?;
        }
        Ok(())
    }

    /// Flushes the writer.
    ///
    /// # Errors
    /// Returns an error if flushing fails.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes the simplified coordinate file for `tracks` into `dir`.
///
/// Coordinates are divided by `factor` and the file name is chosen by
/// [`output_file_name`]. Returns the path written.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_tracks(
    dir: &Path,
    tracks: &TrackCollection,
    factor: InterpolationFactor,
) -> Result<PathBuf> {
    let path = dir.join(output_file_name(factor));
    let records = tracks.to_records(factor);
    let mut writer = CoordinateFileWriter::create(&path)?;
    writer.write_records(&records)?;
    writer.flush()?;
    log::info!("wrote {} rows to {}", records.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_format_value_matches_table_layout() {
        assert_eq!(format_value(2.0), "2.000000000000000000e+00");
        assert_eq!(format_value(-1.0), "-1.000000000000000000e+00");
        assert_eq!(format_value(0.015625), "1.562500000000000000e-02");
        assert_eq!(format_value(1234.5), "1.234500000000000000e+03");
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name(InterpolationFactor::ONE), "output.txt");
        let two = InterpolationFactor::new(2).unwrap();
        assert_eq!(output_file_name(two), "output_inter.txt");
    }

    #[test]
    fn test_write_records() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = CoordinateFileWriter::create(file.path()).unwrap();

        writer
            .write_records(&[RawRecord::new(1.5, 2.5), RawRecord::TERMINATOR])
            .unwrap();
        writer.flush().unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "1.500000000000000000e+00 2.500000000000000000e+00",
                "-1.000000000000000000e+00 -1.000000000000000000e+00",
            ]
        );
    }
}
