//! Acquisition dispatcher
//!
//! Routes a request to the one strategy that serves the detected
//! environment. Fallbacks happen inside strategies, never across them.

use std::path::Path;
use std::sync::Arc;

use log::{debug, info};

use crate::domain::environment::{detect_current, EnvironmentContext};

use super::acquisition::{
    AcquireError, AcquisitionStrategy, LinuxStrategy, MacStrategy, WindowsStrategy, WslBridge,
    WslStrategy,
};
use super::ports::{ProcessRunner, ToolProbe};

/// Selects and runs the acquisition strategy for an environment
pub struct AcquisitionDispatcher {
    runner: Arc<dyn ProcessRunner>,
    probe: Arc<dyn ToolProbe>,
    bridge: WslBridge,
}

impl AcquisitionDispatcher {
    /// Create a dispatcher with the default WSL bridge
    pub fn new(runner: Arc<dyn ProcessRunner>, probe: Arc<dyn ToolProbe>) -> Self {
        Self::with_bridge(runner, probe, WslBridge::default())
    }

    /// Create a dispatcher with a custom WSL bridge
    pub fn with_bridge(
        runner: Arc<dyn ProcessRunner>,
        probe: Arc<dyn ToolProbe>,
        bridge: WslBridge,
    ) -> Self {
        Self {
            runner,
            probe,
            bridge,
        }
    }

    fn strategy_for(&self, context: EnvironmentContext) -> Option<Box<dyn AcquisitionStrategy>> {
        match context {
            EnvironmentContext::NativeWindows => {
                Some(Box::new(WindowsStrategy::new(self.runner.clone())))
            }
            EnvironmentContext::Wsl => Some(Box::new(WslStrategy::new(
                self.runner.clone(),
                self.probe.clone(),
                self.bridge.clone(),
            ))),
            EnvironmentContext::LinuxX11 | EnvironmentContext::LinuxWayland => {
                Some(Box::new(LinuxStrategy::new(self.runner.clone())))
            }
            EnvironmentContext::MacOs => Some(Box::new(MacStrategy::new(self.runner.clone()))),
            EnvironmentContext::Unsupported => None,
        }
    }

    /// Acquire the clipboard image into `destination` for a known context
    pub async fn acquire(
        &self,
        context: EnvironmentContext,
        destination: &Path,
    ) -> Result<(), AcquireError> {
        let strategy = self
            .strategy_for(context)
            .ok_or(AcquireError::Unsupported(context))?;

        debug!(
            "Acquiring clipboard image with {} strategy into {}",
            strategy.name(),
            destination.display()
        );
        strategy.acquire(destination).await
    }

    /// Detect the environment and acquire into `destination`.
    ///
    /// Every failure collapses to `false`; the reason is logged.
    pub async fn paste_clipboard_image(&self, destination: &Path) -> bool {
        self.paste_in(detect_current(), destination).await
    }

    /// Boolean acquisition for an explicit context.
    ///
    /// An existing destination is refused without spawning anything.
    pub async fn paste_in(&self, context: EnvironmentContext, destination: &Path) -> bool {
        if tokio::fs::try_exists(destination).await.unwrap_or(true) {
            info!("Refusing to overwrite {}", destination.display());
            return false;
        }

        match self.acquire(context, destination).await {
            Ok(()) => true,
            Err(e) => {
                info!("Clipboard image not acquired: {}", e);
                false
            }
        }
    }
}
