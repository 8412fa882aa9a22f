//! Destination path value object for pasted images

use std::fmt;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::error::DestinationError;

/// Default file name prefix for pasted images
pub const DEFAULT_FILE_PREFIX: &str = "clipboard-image";

/// Extension every destination carries
pub const PNG_EXTENSION: &str = "png";

/// Absolute path a clipboard image is written to.
/// Always ends in `.png`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageDestination {
    path: PathBuf,
}

impl ImageDestination {
    /// Validate a caller-supplied path
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, DestinationError> {
        let path = path.into();

        let is_png = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case(PNG_EXTENSION))
            .unwrap_or(false);
        if !is_png {
            return Err(DestinationError::NotPng(path.display().to_string()));
        }

        if !path.is_absolute() {
            return Err(DestinationError::NotAbsolute(path.display().to_string()));
        }

        Ok(Self { path })
    }

    /// Claim the destination by creating it empty.
    ///
    /// Fails with [`DestinationError::Exists`] when any file is already
    /// there, so an existing file is never overwritten or removed. The
    /// parent directory must exist.
    pub fn reserve(&self) -> Result<(), DestinationError> {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(DestinationError::Exists(self.path.display().to_string()))
            }
            Err(e) => Err(DestinationError::Reserve {
                path: self.path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// Generate and reserve a fresh destination inside `dir`.
    ///
    /// Names follow `<prefix>-<unix millis>.png`; a taken name bumps to
    /// `<prefix>-<unix millis>-<n>.png`.
    pub fn generate(dir: &Path, prefix: &str) -> Result<Self, DestinationError> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);

        Self::generate_at(dir, prefix, millis)
    }

    /// Generate and reserve a destination for a fixed timestamp.
    ///
    /// The returned file exists (empty) and belongs to the caller.
    pub fn generate_at(dir: &Path, prefix: &str, millis: u128) -> Result<Self, DestinationError> {
        validate_prefix(prefix)?;

        let mut counter: u32 = 0;
        loop {
            let name = if counter == 0 {
                format!("{}-{}.{}", prefix, millis, PNG_EXTENSION)
            } else {
                format!("{}-{}-{}.{}", prefix, millis, counter, PNG_EXTENSION)
            };

            let candidate = Self::new(dir.join(name))?;
            match candidate.reserve() {
                Ok(()) => return Ok(candidate),
                Err(DestinationError::Exists(_)) => counter += 1,
                Err(e) => return Err(e),
            }
        }
    }

    /// Full path of the destination
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the destination lives in
    pub fn parent(&self) -> &Path {
        // Absolute paths with a file name always have one
        self.path.parent().unwrap_or_else(|| Path::new("/"))
    }

    /// File name component, e.g. `clipboard-image-1700000000000.png`
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Consume into the underlying path
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

impl fmt::Display for ImageDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl AsRef<Path> for ImageDestination {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Check a file name prefix is safe to embed in a path and in a script
pub fn validate_prefix(prefix: &str) -> Result<(), DestinationError> {
    let valid = !prefix.is_empty()
        && prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(DestinationError::InvalidPrefix(prefix.to_string()))
    }
}

/// Render a path for the stdout side channel, with `/` separators
pub fn portable_path(path: &Path) -> String {
    let text = path.display().to_string();
    if cfg!(windows) {
        forward_slashes(&text)
    } else {
        text
    }
}

/// Replace every backslash with `/`
pub fn forward_slashes(text: &str) -> String {
    text.replace('\\', "/")
}
