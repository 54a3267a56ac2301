//! Scoped removal of intermediate files.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Intermediate files belonging to one pipeline phase.
///
/// Every registered path is removed when the guard is dropped, whether the
/// phase succeeded or not. Paths that were never created are skipped.
#[derive(Debug, Default)]
pub struct IntermediateFiles {
    paths: Vec<PathBuf>,
    keep: bool,
}

impl IntermediateFiles {
    /// Creates a guard. With `keep` set, nothing is removed.
    #[must_use]
    pub fn new(keep: bool) -> Self {
        Self {
            paths: Vec::new(),
            keep,
        }
    }

    /// Registers `path` for removal and returns it.
    ///
    /// Registering the same path twice removes it only once.
    pub fn register(&mut self, path: impl Into<PathBuf>) -> PathBuf {
        let path = path.into();
        if !self.paths.contains(&path) {
            self.paths.push(path.clone());
        }
        path
    }

    /// Leaves every registered file in place.
    pub fn keep(&mut self) {
        self.keep = true;
    }

    /// Removes every registered file now.
    pub fn remove_all(&mut self) {
        if self.keep {
            for path in &self.paths {
                log::info!("keeping intermediate {}", path.display());
            }
            self.paths.clear();
            return;
        }
        for path in self.paths.drain(..) {
            remove_quietly(&path);
        }
    }
}

impl Drop for IntermediateFiles {
    fn drop(&mut self) {
        self.remove_all();
    }
}

fn remove_quietly(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => log::debug!("removed {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => log::warn!("could not remove {}: {e}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a_copy.png");
        let b = dir.path().join("a_copy.pgm");
        fs::write(&a, b"x").unwrap();
        fs::write(&b, b"y").unwrap();

        {
            let mut files = IntermediateFiles::new(false);
            files.register(&a);
            files.register(&b);
            files.register(dir.path().join("never-created.txt"));
        }

        assert!(!a.exists());
        assert!(!b.exists());
    }

    #[test]
    fn test_duplicate_registration() {
        let mut files = IntermediateFiles::new(false);
        files.register("same.pgm");
        files.register("same.pgm");
        assert_eq!(files.paths.len(), 1);
    }

    #[test]
    fn test_keep_leaves_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a_inter.png");
        fs::write(&a, b"x").unwrap();

        let mut files = IntermediateFiles::new(false);
        files.register(&a);
        files.keep();
        drop(files);

        assert!(a.exists());
    }

    #[test]
    fn test_removed_even_when_phase_fails() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("output_intermediate.txt");

        let phase = || -> Result<(), String> {
            let mut files = IntermediateFiles::new(false);
            let path = files.register(&a);
            fs::write(&path, b"1 1\n").map_err(|e| e.to_string())?;
            Err("detector failed".to_string())
        };

        assert!(phase().is_err());
        assert!(!a.exists());
    }
}
