//! Platform acquisition strategies
//!
//! Each strategy extracts the clipboard image into a destination file using
//! one environment's native helper. A strategy either leaves a non-empty
//! file at the destination and returns `Ok`, or removes whatever it wrote
//! and returns the reason it failed.

mod error;
mod linux;
mod macos;
mod powershell;
mod windows;
mod wsl;

#[cfg(test)]
pub(crate) mod testing;

pub use error::AcquireError;
pub use linux::{LinuxStrategy, WL_PASTE, XCLIP};
pub use macos::{MacStrategy, PNGPASTE};
pub use powershell::{clipboard_script, ScriptMarker, POWERSHELL};
pub use windows::WindowsStrategy;
pub use wsl::{WslBridge, WslStrategy};

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use log::{debug, warn};

/// One environment-specific way of acquiring a clipboard image
#[async_trait]
pub trait AcquisitionStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Write the clipboard image to `destination`.
    async fn acquire(&self, destination: &Path) -> Result<(), AcquireError>;
}

/// Check the success postcondition: the file exists and is non-empty
pub(crate) async fn verify_image(tool: &str, destination: &Path) -> Result<(), AcquireError> {
    match tokio::fs::metadata(destination).await {
        Ok(meta) if meta.is_file() && meta.len() > 0 => Ok(()),
        Ok(_) => Err(AcquireError::EmptyOutput(tool.to_string())),
        Err(_) => Err(AcquireError::tool_failed(tool, "no image file was written")),
    }
}

/// Remove a partial or empty output file, ignoring a missing file
pub(crate) async fn discard_partial(destination: &Path) {
    match tokio::fs::remove_file(destination).await {
        Ok(()) => debug!("Removed partial output {}", destination.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(
            "Failed to remove partial output {}: {}",
            destination.display(),
            e
        ),
    }
}
