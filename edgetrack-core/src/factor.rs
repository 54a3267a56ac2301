//! Integer upsampling ratio applied before edge detection.

use crate::{Error, Result};
use std::fmt;
use std::num::NonZeroU32;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interpolation factor (integer >= 1).
///
/// Coordinates produced on the upsampled grid are divided by this factor
/// to bring them back to the original pixel grid. A factor of one means
/// no interpolation took place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct InterpolationFactor(NonZeroU32);

impl InterpolationFactor {
    /// The identity factor.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Creates a factor, rejecting zero.
    ///
    /// # Errors
    /// Returns [`Error::InvalidFactor`] if `factor` is zero.
    pub fn new(factor: u32) -> Result<Self> {
        NonZeroU32::new(factor)
            .map(Self)
            .ok_or(Error::InvalidFactor(factor))
    }

    /// Returns the raw factor.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns the factor as a float divisor.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0.get())
    }

    /// Returns true if the factor leaves coordinates unchanged.
    #[must_use]
    pub fn is_identity(self) -> bool {
        self.0.get() == 1
    }
}

impl Default for InterpolationFactor {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for InterpolationFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for InterpolationFactor {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_factor_rejected() {
        assert!(matches!(
            InterpolationFactor::new(0),
            Err(Error::InvalidFactor(0))
        ));
    }

    #[test]
    fn test_identity() {
        assert!(InterpolationFactor::ONE.is_identity());
        assert!(InterpolationFactor::default().is_identity());
        let four = InterpolationFactor::new(4).unwrap();
        assert!(!four.is_identity());
        assert_eq!(four.get(), 4);
        assert_eq!(four.to_string(), "4");
    }
}
