//! File removal port interface

use std::io;
use std::path::Path;
use std::sync::Arc;

/// Port for deleting tracked temporary files.
///
/// Removal is synchronous so shutdown cleanup can run to completion
/// without a runtime.
pub trait FileRemover: Send + Sync {
    /// Delete the file at `path`.
    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// Blanket implementation for shared removers
impl<T: FileRemover + ?Sized> FileRemover for Arc<T> {
    fn remove(&self, path: &Path) -> io::Result<()> {
        self.as_ref().remove(path)
    }
}
