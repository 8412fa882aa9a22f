//! Native Windows strategy using PowerShell

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::application::ports::ProcessRunner;

use super::powershell::{clipboard_command, ScriptMarker, POWERSHELL};
use super::{discard_partial, verify_image, AcquireError, AcquisitionStrategy};

/// Saves the clipboard bitmap through `System.Windows.Forms.Clipboard`
pub struct WindowsStrategy {
    runner: Arc<dyn ProcessRunner>,
}

impl WindowsStrategy {
    /// Create a new Windows strategy
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }
}

/// Run the clipboard script against a Windows-side path and interpret its marker
pub(crate) async fn run_clipboard_script(
    runner: &dyn ProcessRunner,
    windows_path: &str,
) -> Result<(), AcquireError> {
    let output = runner.output(&clipboard_command(windows_path)).await?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    match ScriptMarker::parse(&stdout) {
        ScriptMarker::Success => Ok(()),
        ScriptMarker::NoImage => Err(AcquireError::NoImage),
        ScriptMarker::Error => Err(AcquireError::tool_failed(
            POWERSHELL,
            "clipboard script reported an error",
        )),
        ScriptMarker::Unexpected(text) => {
            debug!("{} printed {:?} ({})", POWERSHELL, text, output.status);
            Err(AcquireError::tool_failed(
                POWERSHELL,
                format!("unexpected output ({})", output.status),
            ))
        }
    }
}

#[async_trait]
impl AcquisitionStrategy for WindowsStrategy {
    fn name(&self) -> &'static str {
        "windows"
    }

    async fn acquire(&self, destination: &Path) -> Result<(), AcquireError> {
        let windows_path = destination.to_string_lossy();

        let result = match run_clipboard_script(self.runner.as_ref(), &windows_path).await {
            Ok(()) => verify_image(POWERSHELL, destination).await,
            Err(e) => Err(e),
        };

        if result.is_err() {
            discard_partial(destination).await;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::acquisition::testing::{Script, ScriptedRunner};

    #[tokio::test]
    async fn success_marker_with_file_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("img.png");
        let runner = ScriptedRunner::new().with(
            POWERSHELL,
            Script::exits_writing(0, b"success\r\n", &dest, b"\x89PNG\r\n\x1a\n"),
        );
        let strategy = WindowsStrategy::new(Arc::new(runner));

        assert!(strategy.acquire(&dest).await.is_ok());
        assert_eq!(std::fs::metadata(&dest).unwrap().len(), 8);
    }

    #[tokio::test]
    async fn no_image_marker_fails() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("img.png");
        let runner = ScriptedRunner::new().with(POWERSHELL, Script::exits(0, b"no-image\r\n"));
        let strategy = WindowsStrategy::new(Arc::new(runner));

        assert_eq!(strategy.acquire(&dest).await, Err(AcquireError::NoImage));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn success_marker_without_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("img.png");
        let runner = ScriptedRunner::new().with(POWERSHELL, Script::exits(0, b"success"));
        let strategy = WindowsStrategy::new(Arc::new(runner));

        assert!(strategy.acquire(&dest).await.is_err());
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn error_marker_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("img.png");
        let runner = ScriptedRunner::new().with(
            POWERSHELL,
            Script::exits_writing(0, b"error", &dest, b"\x89P"),
        );
        let strategy = WindowsStrategy::new(Arc::new(runner));

        assert!(matches!(
            strategy.acquire(&dest).await,
            Err(AcquireError::ToolFailed { .. })
        ));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn missing_powershell_is_tool_absent() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("img.png");
        let strategy = WindowsStrategy::new(Arc::new(ScriptedRunner::new()));

        assert_eq!(
            strategy.acquire(&dest).await,
            Err(AcquireError::ToolAbsent(POWERSHELL.to_string()))
        );
    }

    #[tokio::test]
    async fn script_targets_destination_path() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("img.png");
        let runner = Arc::new(ScriptedRunner::new().with(POWERSHELL, Script::exits(0, b"no-image")));
        let strategy = WindowsStrategy::new(runner.clone());

        let _ = strategy.acquire(&dest).await;

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        let script = calls[0].args.last().unwrap();
        assert!(script.contains(&*dest.to_string_lossy()));
    }
}
