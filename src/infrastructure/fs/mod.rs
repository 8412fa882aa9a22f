//! Filesystem adapters

use std::io;
use std::path::Path;

use crate::application::ports::FileRemover;

/// Deletes files with `std::fs::remove_file`
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFileRemover;

impl FileRemover for StdFileRemover {
    fn remove(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        std::fs::write(&path, b"x").unwrap();

        StdFileRemover.remove(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = StdFileRemover.remove(&dir.path().join("gone.png")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
