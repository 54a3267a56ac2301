//! Reader for the edge detector's flat coordinate file.
//!
//! The file is a whitespace-separated two-column numeric table. Blank
//! lines and `#` comments are ignored; every other row must hold exactly
//! two numbers.

use crate::{Error, Result};
use edgetrack_core::{split_tracks, RawRecord, TrackCollection};
use std::fs;
use std::path::Path;

/// Parses the text of a coordinate file into records.
///
/// # Errors
/// Returns [`Error::Parse`] for rows with a column count other than two or
/// with non-numeric fields.
pub fn parse_raw_records(text: &str) -> Result<Vec<RawRecord>> {
    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }
        records.push(parse_row(content, idx + 1)?);
    }
    Ok(records)
}

fn parse_row(content: &str, line: usize) -> Result<RawRecord> {
    let fields: Vec<&str> = content.split_whitespace().collect();
    let [x, y] = fields.as_slice() else {
        return Err(Error::Parse {
            line,
            message: format!("expected 2 columns, found {}", fields.len()),
        });
    };
    Ok(RawRecord::new(parse_value(x, line)?, parse_value(y, line)?))
}

fn parse_value(field: &str, line: usize) -> Result<f64> {
    field.parse::<f64>().map_err(|e| Error::Parse {
        line,
        message: format!("invalid number {field:?}: {e}"),
    })
}

/// Reads all records from a coordinate file.
///
/// # Errors
/// Returns an error if the file cannot be read or is malformed.
pub fn read_raw_records<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    let text = fs::read_to_string(path.as_ref())?;
    let records = parse_raw_records(&text)?;
    log::debug!(
        "read {} records from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

/// Reads a coordinate file and splits it into tracks longer than
/// `min_track_length` points.
///
/// The whole file is validated before any filtering happens.
///
/// # Errors
/// Returns an error if the file cannot be read or is malformed.
pub fn read_tracks<P: AsRef<Path>>(path: P, min_track_length: usize) -> Result<TrackCollection> {
    let records = read_raw_records(path)?;
    Ok(split_tracks(records, min_track_length))
}
