//! WSL strategy: Windows clipboard through interop, Linux tools as fallback

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use crate::application::ports::{ProcessRunner, ToolProbe};

use super::linux::{LinuxStrategy, WL_PASTE, XCLIP};
use super::powershell::POWERSHELL;
use super::windows::run_clipboard_script;
use super::{discard_partial, verify_image, AcquireError, AcquisitionStrategy};

/// The same Windows directory seen from both sides of the WSL boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WslBridge {
    /// Directory as PowerShell sees it
    pub windows_dir: String,
    /// Directory as mounted inside the Linux distribution
    pub mount_dir: PathBuf,
}

impl WslBridge {
    /// Pair a Windows directory with its mount point inside WSL
    pub fn new(windows_dir: impl Into<String>, mount_dir: impl Into<PathBuf>) -> Self {
        Self {
            windows_dir: windows_dir.into(),
            mount_dir: mount_dir.into(),
        }
    }

    /// Windows-side path for a file name
    pub fn windows_path(&self, file_name: &str) -> String {
        format!("{}\\{}", self.windows_dir.trim_end_matches('\\'), file_name)
    }

    /// Linux-side path for a file name
    pub fn mount_path(&self, file_name: &str) -> PathBuf {
        self.mount_dir.join(file_name)
    }
}

impl Default for WslBridge {
    fn default() -> Self {
        Self::new("C:\\Windows\\Temp", "/mnt/c/Windows/Temp")
    }
}

/// Stages the image in a Windows directory through the PowerShell script,
/// then copies it across the mount.
///
/// When the Windows side fails and `xclip` or `wl-paste` is installed in the
/// distribution, the Linux helpers get a turn.
pub struct WslStrategy {
    runner: Arc<dyn ProcessRunner>,
    probe: Arc<dyn ToolProbe>,
    bridge: WslBridge,
}

impl WslStrategy {
    /// Create a new WSL strategy
    pub fn new(runner: Arc<dyn ProcessRunner>, probe: Arc<dyn ToolProbe>, bridge: WslBridge) -> Self {
        Self {
            runner,
            probe,
            bridge,
        }
    }

    /// Save through PowerShell on the Windows side, then copy across the mount
    async fn acquire_via_windows(&self, destination: &Path) -> Result<(), AcquireError> {
        let file_name = destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| AcquireError::Filesystem("destination has no file name".to_string()))?;
        let staged = self.bridge.mount_path(&file_name);

        let result = self.stage_and_copy(&file_name, &staged, destination).await;

        // The Windows-side copy never outlives the attempt
        match tokio::fs::remove_file(&staged).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove {}: {}", staged.display(), e),
        }

        if result.is_err() {
            discard_partial(destination).await;
        }
        result
    }

    async fn stage_and_copy(
        &self,
        file_name: &str,
        staged: &Path,
        destination: &Path,
    ) -> Result<(), AcquireError> {
        let windows_path = self.bridge.windows_path(file_name);
        run_clipboard_script(self.runner.as_ref(), &windows_path).await?;

        tokio::fs::copy(staged, destination).await.map_err(|e| {
            AcquireError::Filesystem(format!(
                "failed to copy {} to {}: {}",
                staged.display(),
                destination.display(),
                e
            ))
        })?;

        verify_image(POWERSHELL, destination).await
    }

    async fn has_linux_tool(&self) -> bool {
        self.probe.has_command(XCLIP).await || self.probe.has_command(WL_PASTE).await
    }
}

#[async_trait]
impl AcquisitionStrategy for WslStrategy {
    fn name(&self) -> &'static str {
        "wsl"
    }

    async fn acquire(&self, destination: &Path) -> Result<(), AcquireError> {
        let windows_err = match self.acquire_via_windows(destination).await {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };
        debug!("Windows clipboard path failed under WSL: {}", windows_err);

        if !self.has_linux_tool().await {
            return Err(windows_err);
        }

        debug!("Falling back to Linux clipboard tools");
        LinuxStrategy::new(self.runner.clone()).acquire(destination).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::acquisition::testing::{FakeProbe, Script, ScriptedRunner};

    struct Fixture {
        _mount: tempfile::TempDir,
        out: tempfile::TempDir,
        bridge: WslBridge,
    }

    impl Fixture {
        fn new() -> Self {
            let mount = tempfile::tempdir().unwrap();
            let bridge = WslBridge::new("C:\\Windows\\Temp", mount.path());
            Self {
                _mount: mount,
                out: tempfile::tempdir().unwrap(),
                bridge,
            }
        }

        fn destination(&self) -> PathBuf {
            self.out.path().join("clipboard-image-1000.png")
        }

        fn staged(&self) -> PathBuf {
            self.bridge.mount_path("clipboard-image-1000.png")
        }
    }

    #[test]
    fn bridge_paths() {
        let bridge = WslBridge::default();
        assert_eq!(bridge.windows_path("a.png"), "C:\\Windows\\Temp\\a.png");
        assert_eq!(bridge.mount_path("a.png"), PathBuf::from("/mnt/c/Windows/Temp/a.png"));

        let trailing = WslBridge::new("D:\\tmp\\", "/mnt/d/tmp");
        assert_eq!(trailing.windows_path("a.png"), "D:\\tmp\\a.png");
    }

    #[tokio::test]
    async fn copies_windows_file_and_removes_staged_copy() {
        let fx = Fixture::new();
        let dest = fx.destination();
        let runner = Arc::new(ScriptedRunner::new().with(
            POWERSHELL,
            Script::exits_writing(0, b"success\r\n", &fx.staged(), b"\x89PNG data"),
        ));
        let strategy = WslStrategy::new(
            runner.clone(),
            Arc::new(FakeProbe::default()),
            fx.bridge.clone(),
        );

        assert!(strategy.acquire(&dest).await.is_ok());
        assert_eq!(std::fs::read(&dest).unwrap(), b"\x89PNG data");
        assert!(!fx.staged().exists());

        let script = runner.calls()[0].args.last().unwrap().clone();
        assert!(script.contains("C:\\Windows\\Temp\\clipboard-image-1000.png"));
    }

    #[tokio::test]
    async fn no_image_without_linux_tools_fails() {
        let fx = Fixture::new();
        let dest = fx.destination();
        let runner = Arc::new(ScriptedRunner::new().with(POWERSHELL, Script::exits(0, b"no-image")));
        let strategy = WslStrategy::new(
            runner.clone(),
            Arc::new(FakeProbe::default()),
            fx.bridge.clone(),
        );

        assert_eq!(strategy.acquire(&dest).await, Err(AcquireError::NoImage));
        assert!(!dest.exists());
        assert_eq!(runner.programs_called(), vec![POWERSHELL.to_string()]);
    }

    #[tokio::test]
    async fn falls_back_to_linux_tools_when_present() {
        let fx = Fixture::new();
        let dest = fx.destination();
        let runner = ScriptedRunner::new()
            .with(POWERSHELL, Script::exits(0, b"error"))
            .with(WL_PASTE, Script::exits(0, &[1u8; 16]));
        let strategy = WslStrategy::new(
            Arc::new(runner),
            Arc::new(FakeProbe::with_tools(&[WL_PASTE])),
            fx.bridge.clone(),
        );

        assert!(strategy.acquire(&dest).await.is_ok());
        assert_eq!(std::fs::metadata(&dest).unwrap().len(), 16);
    }

    #[tokio::test]
    async fn success_marker_without_staged_file_fails() {
        let fx = Fixture::new();
        let dest = fx.destination();
        let runner = ScriptedRunner::new().with(POWERSHELL, Script::exits(0, b"success"));
        let strategy = WslStrategy::new(
            Arc::new(runner),
            Arc::new(FakeProbe::default()),
            fx.bridge.clone(),
        );

        assert!(matches!(
            strategy.acquire(&dest).await,
            Err(AcquireError::Filesystem(_))
        ));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn empty_staged_file_is_cleaned_up_on_both_sides() {
        let fx = Fixture::new();
        let dest = fx.destination();
        let runner = ScriptedRunner::new().with(
            POWERSHELL,
            Script::exits_writing(0, b"success", &fx.staged(), b""),
        );
        let strategy = WslStrategy::new(
            Arc::new(runner),
            Arc::new(FakeProbe::default()),
            fx.bridge.clone(),
        );

        assert_eq!(
            strategy.acquire(&dest).await,
            Err(AcquireError::EmptyOutput(POWERSHELL.to_string()))
        );
        assert!(!dest.exists());
        assert!(!fx.staged().exists());
    }
}
