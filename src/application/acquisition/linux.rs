//! Native Linux strategy: xclip first, wl-paste as fallback

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::application::ports::{CommandSpec, ProcessRunner};

use super::{discard_partial, verify_image, AcquireError, AcquisitionStrategy};

/// X11 clipboard helper
pub const XCLIP: &str = "xclip";

/// Wayland clipboard helper
pub const WL_PASTE: &str = "wl-paste";

/// Streams the PNG target of the clipboard into the destination file.
///
/// Both helpers are attempted in order regardless of the session type;
/// xclip keeps working under XWayland and wl-paste under native Wayland.
pub struct LinuxStrategy {
    runner: Arc<dyn ProcessRunner>,
}

impl LinuxStrategy {
    /// Create a new Linux strategy
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    fn xclip_command() -> CommandSpec {
        CommandSpec::new(XCLIP).args(["-selection", "clipboard", "-t", "image/png", "-o"])
    }

    fn wl_paste_command() -> CommandSpec {
        CommandSpec::new(WL_PASTE).args(["--type", "image/png"])
    }

    /// Run one helper with stdout redirected to the destination
    async fn try_helper(&self, command: &CommandSpec, destination: &Path) -> Result<(), AcquireError> {
        let result = match self.runner.output_to_file(command, destination).await {
            Ok(status) if status.success() => verify_image(&command.program, destination).await,
            Ok(status) => Err(AcquireError::tool_failed(&command.program, status.to_string())),
            Err(e) => Err(e.into()),
        };

        if result.is_err() {
            discard_partial(destination).await;
        }
        result
    }
}

#[async_trait]
impl AcquisitionStrategy for LinuxStrategy {
    fn name(&self) -> &'static str {
        "linux"
    }

    async fn acquire(&self, destination: &Path) -> Result<(), AcquireError> {
        match self.try_helper(&Self::xclip_command(), destination).await {
            Ok(()) => return Ok(()),
            Err(e) => debug!("{} did not produce an image: {}", XCLIP, e),
        }

        self.try_helper(&Self::wl_paste_command(), destination).await
    }
}
