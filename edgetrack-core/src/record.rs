//! Raw detector records.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single `(x, y)` row of the edge detector's flat output file.
///
/// A record whose `x` is not greater than `-1` is not a point but a
/// terminator separating one track's run of points from the next.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawRecord {
    /// X coordinate (sub-pixel index).
    pub x: f64,
    /// Y coordinate (sub-pixel index).
    pub y: f64,
}

impl RawRecord {
    /// The canonical terminator written between tracks.
    pub const TERMINATOR: Self = Self { x: -1.0, y: -1.0 };

    /// Creates a new record.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if this record ends a run of points.
    ///
    /// NaN coordinates count as terminators since they fail the `x > -1` test.
    #[must_use]
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn is_terminator(&self) -> bool {
        !(self.x > -1.0)
    }

    /// Returns the record with both coordinates divided by `divisor`.
    #[must_use]
    pub fn divided_by(self, divisor: f64) -> Self {
        Self {
            x: self.x / divisor,
            y: self.y / divisor,
        }
    }
}

impl From<(f64, f64)> for RawRecord {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminator_threshold() {
        assert!(RawRecord::TERMINATOR.is_terminator());
        assert!(RawRecord::new(-3.5, 2.0).is_terminator());
        assert!(RawRecord::new(f64::NAN, 0.0).is_terminator());
        assert!(!RawRecord::new(-0.5, -7.0).is_terminator());
        assert!(!RawRecord::new(0.0, 0.0).is_terminator());
    }
}
