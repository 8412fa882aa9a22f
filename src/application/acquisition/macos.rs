//! macOS strategy using pngpaste

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{CommandSpec, ProcessRunner};

use super::{discard_partial, verify_image, AcquireError, AcquisitionStrategy};

/// Homebrew helper that writes the clipboard image to a file
pub const PNGPASTE: &str = "pngpaste";

/// Lets `pngpaste` write the clipboard image straight to the destination
pub struct MacStrategy {
    runner: Arc<dyn ProcessRunner>,
}

impl MacStrategy {
    /// Create a new macOS strategy
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl AcquisitionStrategy for MacStrategy {
    fn name(&self) -> &'static str {
        "macos"
    }

    async fn acquire(&self, destination: &Path) -> Result<(), AcquireError> {
        let command = CommandSpec::new(PNGPASTE).arg(destination.to_string_lossy());

        let result = match self.runner.output(&command).await {
            Ok(output) if output.status.success() => verify_image(PNGPASTE, destination).await,
            // pngpaste prints "No PNG data found on the clipboard!" to stderr
            Ok(output) => Err(AcquireError::tool_failed(PNGPASTE, output.status.to_string())),
            Err(e) => Err(e.into()),
        };

        if result.is_err() {
            discard_partial(destination).await;
        }
        result
    }
}
