//! Sentinel-delimited track splitting.

use crate::{RawRecord, TrackCollection};

/// Points accumulated since the last terminator.
#[derive(Default)]
struct Run {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Run {
    fn push(&mut self, record: RawRecord) {
        self.x.push(record.x);
        self.y.push(record.y);
    }

    fn len(&self) -> usize {
        self.x.len()
    }
}

/// Splits detector records into tracks, keeping runs longer than
/// `min_track_length`.
///
/// Points accumulate until a terminator record (`x <= -1`). At each
/// terminator the run is accepted if it holds strictly more than
/// `min_track_length` points, then the accumulator is reset either way.
/// A run still open when the records end is dropped.
///
/// # Examples
///
/// ```
/// use edgetrack_core::{split_tracks, RawRecord};
///
/// let records = [
///     RawRecord::new(5.0, 5.0),
///     RawRecord::new(6.0, 6.0),
///     RawRecord::new(7.0, 7.0),
///     RawRecord::TERMINATOR,
///     RawRecord::new(1.0, 1.0),
///     RawRecord::TERMINATOR,
/// ];
/// let tracks = split_tracks(records, 2);
/// assert_eq!(tracks.len(), 1);
/// assert_eq!(tracks.get(0).unwrap().x, vec![5.0, 6.0, 7.0]);
/// ```
pub fn split_tracks<I>(records: I, min_track_length: usize) -> TrackCollection
where
    I: IntoIterator<Item = RawRecord>,
{
    let (tracks, _unterminated) = records.into_iter().fold(
        (TrackCollection::new(), Run::default()),
        |(mut tracks, mut run), record| {
            if record.is_terminator() {
                let finished = std::mem::take(&mut run);
                if finished.len() > min_track_length {
                    tracks.push_columns(finished.x, finished.y);
                }
            } else {
                run.push(record);
            }
            (tracks, run)
        },
    );
    tracks
}
