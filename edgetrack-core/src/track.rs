//! Track and track collection types.
//!
//! A track stores its points in two parallel columns (`x` and `y`), the
//! same layout the detector writes them in. Track IDs are dense and
//! assigned in discovery order, so the collection is a plain vector
//! indexed by ID.

use crate::{InterpolationFactor, RawRecord};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered run of sub-pixel points believed to trace one edge.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Track {
    /// Sequential track ID.
    pub id: usize,
    /// Columnar storage for X coordinates.
    pub x: Vec<f64>,
    /// Columnar storage for Y coordinates.
    pub y: Vec<f64>,
}

impl Track {
    /// Returns the number of points in the track.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns true if the track has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Returns an iterator over `(x, y)` points.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Returns the axis-aligned bounds `(min_x, max_x, min_y, max_y)`,
    /// or `None` for an empty track.
    #[must_use]
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let fold = |values: &[f64]| {
            values
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                })
        };
        let (min_x, max_x) = fold(&self.x);
        let (min_y, max_y) = fold(&self.y);
        Some((min_x, max_x, min_y, max_y))
    }

    fn map_coordinates(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            id: self.id,
            x: self.x.iter().map(|&v| f(v)).collect(),
            y: self.y.iter().map(|&v| f(v)).collect(),
        }
    }
}

/// Tracks keyed by their sequential ID, in discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackCollection {
    tracks: Vec<Track>,
}

impl TrackCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a track built from `points` and returns its ID.
    ///
    /// IDs are assigned sequentially starting at 0.
    pub fn push_points<I>(&mut self, points: I) -> usize
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let id = self.tracks.len();
        let (x, y): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
        self.tracks.push(Track { id, x, y });
        id
    }

    pub(crate) fn push_columns(&mut self, x: Vec<f64>, y: Vec<f64>) -> usize {
        debug_assert_eq!(x.len(), y.len());
        let id = self.tracks.len();
        self.tracks.push(Track { id, x, y });
        id
    }

    /// Returns the number of tracks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Returns true if no track was accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Returns the track with the given ID.
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&Track> {
        self.tracks.get(id)
    }

    /// Iterates over tracks in ID order.
    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Returns the point count of every track, in ID order.
    #[must_use]
    pub fn lengths(&self) -> Vec<usize> {
        self.tracks.iter().map(Track::len).collect()
    }

    /// Returns the bounds of all tracks combined.
    #[must_use]
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        self.tracks
            .iter()
            .filter_map(Track::bounds)
            .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1), a.2.min(b.2), a.3.max(b.3)))
    }

    /// Returns a copy with every coordinate divided by `factor`.
    ///
    /// This maps tracks found on an upsampled image back onto the
    /// original pixel grid.
    #[must_use]
    pub fn rescaled(&self, factor: InterpolationFactor) -> Self {
        if factor.is_identity() {
            return self.clone();
        }
        let divisor = factor.as_f64();
        self.map_coordinates(|v| v / divisor)
    }

    /// Flattens the collection back into detector records.
    ///
    /// Each track's points are followed by a `(-1, -1)` terminator and
    /// every value, terminators included, is divided by `factor`.
    #[must_use]
    pub fn to_records(&self, factor: InterpolationFactor) -> Vec<RawRecord> {
        let divisor = factor.as_f64();
        let total: usize = self.tracks.iter().map(|t| t.len() + 1).sum();
        let mut records = Vec::with_capacity(total);
        for track in &self.tracks {
            records.extend(track.points().map(RawRecord::from));
            records.push(RawRecord::TERMINATOR);
        }
        if !factor.is_identity() {
            for record in &mut records {
                *record = record.divided_by(divisor);
            }
        }
        records
    }

    fn map_coordinates(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            tracks: self.tracks.iter().map(|t| t.map_coordinates(&f)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TrackCollection {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> TrackCollection {
        let mut tracks = TrackCollection::new();
        tracks.push_points([(4.0, 6.0), (8.0, 10.0)]);
        tracks.push_points([(2.0, 2.0)]);
        tracks
    }

    #[test]
    fn test_ids_are_sequential() {
        let tracks = sample();
        let ids: Vec<usize> = tracks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(tracks.lengths(), vec![2, 1]);
    }

    #[test]
    fn test_to_records_inserts_terminators() {
        let records = sample().to_records(InterpolationFactor::ONE);
        assert_eq!(
            records,
            vec![
                RawRecord::new(4.0, 6.0),
                RawRecord::new(8.0, 10.0),
                RawRecord::TERMINATOR,
                RawRecord::new(2.0, 2.0),
                RawRecord::TERMINATOR,
            ]
        );
    }

    #[test]
    fn test_to_records_divides_by_factor() {
        let mut tracks = TrackCollection::new();
        tracks.push_points([(4.0, 4.0), (6.0, 6.0)]);
        let factor = InterpolationFactor::new(2).unwrap();
        let records = tracks.to_records(factor);

        assert_relative_eq!(records[0].x, 2.0);
        assert_relative_eq!(records[1].x, 3.0);
        // Terminators are divided too.
        assert_relative_eq!(records[2].x, -0.5);
        assert_relative_eq!(records[2].y, -0.5);
    }

    #[test]
    fn test_rescale_round_trip() {
        let tracks = sample();
        let factor = InterpolationFactor::new(3).unwrap();
        let back = tracks.rescaled(factor);
        for (a, b) in tracks.iter().zip(back.iter()) {
            assert_eq!(a.id, b.id);
            for ((ax, ay), (bx, by)) in a.points().zip(b.points()) {
                assert_relative_eq!(ax, bx * 3.0, epsilon = 1e-12);
                assert_relative_eq!(ay, by * 3.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_bounds() {
        let (min_x, max_x, min_y, max_y) = sample().bounds().unwrap();
        assert_relative_eq!(min_x, 2.0);
        assert_relative_eq!(max_x, 8.0);
        assert_relative_eq!(min_y, 2.0);
        assert_relative_eq!(max_y, 10.0);
        assert!(TrackCollection::new().bounds().is_none());
    }
}
