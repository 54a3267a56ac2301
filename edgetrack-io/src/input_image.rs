//! Input image loading.

use crate::{Error, Result};
use ndarray::Array2;
use std::path::Path;

/// Grayscale intensities indexed `[row, column]`.
pub type ImageData = Array2<f32>;

/// Loads an image into a 2-D array of intensities in `[0, 1]`.
///
/// Colour images are reduced to luma. Rows run top to bottom, matching the
/// order in which the file stores them.
///
/// # Errors
/// Returns [`Error::Image`] if the file cannot be opened or decoded.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<ImageData> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|source| Error::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let luma = decoded.to_luma32f();
    let (width, height) = luma.dimensions();
    log::debug!("loaded {} ({width}x{height})", path.display());

    Array2::from_shape_vec((height as usize, width as usize), luma.into_raw()).map_err(|e| {
        Error::InvalidFormat(format!(
            "{}: pixel buffer does not match {width}x{height}: {e}",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::{GrayImage, Luma};

    #[test]
    fn test_load_gray_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.png");
        let mut img = GrayImage::new(3, 2);
        img.put_pixel(2, 0, Luma([255]));
        img.put_pixel(0, 1, Luma([51]));
        img.save(&path).unwrap();

        let data = load_image(&path).unwrap();
        assert_eq!(data.dim(), (2, 3));
        assert_relative_eq!(data[[0, 2]], 1.0, epsilon = 1e-6);
        assert_relative_eq!(data[[1, 0]], 0.2, epsilon = 1e-6);
        assert_relative_eq!(data[[0, 0]], 0.0);
    }

    #[test]
    fn test_unreadable_image_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, Error::Image { .. }));
        assert!(err.to_string().contains("broken.png"));
    }
}
