//! Colormap definitions and application logic.

use crate::util::f32_to_u8;

/// Colormaps for intensity images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    /// Viridis (approximate) - blue to teal to green to yellow.
    #[default]
    Viridis,
    /// Grayscale - black to white.
    Grayscale,
    /// Hot (Thermal) - black to red to yellow to white.
    Hot,
}

impl std::fmt::Display for Colormap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Colormap::Viridis => write!(f, "viridis"),
            Colormap::Grayscale => write!(f, "gray"),
            Colormap::Hot => write!(f, "hot"),
        }
    }
}

impl Colormap {
    /// Apply the colormap to a normalized value [0, 1] and return RGB bytes.
    #[must_use]
    pub fn apply(self, val: f32) -> [u8; 3] {
        let val = if val.is_finite() {
            val.clamp(0.0, 1.0)
        } else {
            0.0
        };
        match self {
            Colormap::Grayscale => {
                let v = f32_to_u8(val * 255.0);
                [v, v, v]
            }
            Colormap::Hot => {
                if val < 0.5 {
                    [f32_to_u8(val * 2.0 * 255.0), 0, 0]
                } else if val < 0.75 {
                    [255, f32_to_u8((val - 0.5) * 4.0 * 255.0), 0]
                } else {
                    [255, 255, f32_to_u8((val - 0.75) * 4.0 * 255.0)]
                }
            }
            Colormap::Viridis => {
                // Approximate Viridis (Blue -> Teal -> Green -> Yellow)
                let r = f32_to_u8(255.0 * val.powf(2.0));
                let g = f32_to_u8(255.0 * val);
                let b = f32_to_u8(255.0 * (1.0 - val));
                [r, g, b]
            }
        }
    }
}
