//! Derivation of intermediate file names from the input file name.

use crate::InputError;
use std::path::Path;

/// An input file name split into stem and extension.
///
/// Intermediate files are named after the input: `<stem>_copy.<ext>`,
/// `<stem>_copy.pgm`, `<stem>_converted.png` and `<stem>_inter.png`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputName {
    stem: String,
    extension: String,
}

impl InputName {
    /// Splits `path`'s file name.
    ///
    /// # Errors
    /// Returns an [`InputError`] if the file name has no stem, no
    /// extension, or is not valid UTF-8.
    pub fn parse(path: &Path) -> Result<Self, InputError> {
        let stem = path
            .file_stem()
            .ok_or_else(|| InputError::MissingStem(path.to_path_buf()))?;
        let extension = path
            .extension()
            .ok_or_else(|| InputError::MissingExtension(path.to_path_buf()))?;
        let (Some(stem), Some(extension)) = (stem.to_str(), extension.to_str()) else {
            return Err(InputError::NonUtf8(path.to_path_buf()));
        };
        if extension.is_empty() {
            return Err(InputError::MissingExtension(path.to_path_buf()));
        }
        Ok(Self {
            stem: stem.to_string(),
            extension: extension.to_string(),
        })
    }

    /// File stem.
    #[must_use]
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Extension without the dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Copy of the image handed to the detector stage.
    #[must_use]
    pub fn copy_name(&self) -> String {
        format!("{}_copy.{}", self.stem, self.extension)
    }

    /// PGM version of the copy, read by the edge tracker.
    #[must_use]
    pub fn pgm_name(&self) -> String {
        format!("{}_copy.pgm", self.stem)
    }

    /// PNG conversion fed to the interpolation tool.
    #[must_use]
    pub fn converted_png_name(&self) -> String {
        format!("{}_converted.png", self.stem)
    }

    /// Upsampled image written by the interpolation tool.
    #[must_use]
    pub fn interpolated_name(&self) -> String {
        format!("{}_inter.png", self.stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_names() {
        let name = InputName::parse(Path::new("/data/run7/frame.tif")).unwrap();
        assert_eq!(name.stem(), "frame");
        assert_eq!(name.extension(), "tif");
        assert_eq!(name.copy_name(), "frame_copy.tif");
        assert_eq!(name.pgm_name(), "frame_copy.pgm");
        assert_eq!(name.converted_png_name(), "frame_converted.png");
        assert_eq!(name.interpolated_name(), "frame_inter.png");
    }

    #[test]
    fn test_long_extension_and_dotted_stem() {
        let name = InputName::parse(Path::new("scan.v2.tiff")).unwrap();
        assert_eq!(name.stem(), "scan.v2");
        assert_eq!(name.copy_name(), "scan.v2_copy.tiff");
    }

    #[test]
    fn test_pgm_input_copy_and_pgm_coincide() {
        let name = InputName::parse(Path::new("edges.pgm")).unwrap();
        assert_eq!(name.copy_name(), name.pgm_name());
    }

    #[test]
    fn test_interpolated_image_names() {
        let first = InputName::parse(Path::new("a.png")).unwrap();
        let second = InputName::parse(Path::new(&first.interpolated_name())).unwrap();
        assert_eq!(second.copy_name(), "a_inter_copy.png");
        assert_eq!(second.pgm_name(), "a_inter_copy.pgm");
    }

    #[test]
    fn test_unexpected_shapes_rejected() {
        assert!(matches!(
            InputName::parse(Path::new("noextension")),
            Err(InputError::MissingExtension(_))
        ));
        assert!(matches!(
            InputName::parse(Path::new(".hidden")),
            Err(InputError::MissingExtension(_))
        ));
        assert!(matches!(
            InputName::parse(Path::new("trailingdot.")),
            Err(InputError::MissingExtension(_))
        ));
        assert!(matches!(
            InputName::parse(Path::new("/")),
            Err(InputError::MissingStem(_))
        ));
    }
}
