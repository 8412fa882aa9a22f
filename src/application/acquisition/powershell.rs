//! PowerShell clipboard script shared by the Windows and WSL strategies

use crate::application::ports::CommandSpec;

/// Windows scripting host binary (also reachable from WSL through interop)
pub const POWERSHELL: &str = "powershell.exe";

/// Status line printed by the clipboard script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptMarker {
    /// Image saved to the requested path
    Success,
    /// Clipboard holds no bitmap
    NoImage,
    /// Script caught an exception
    Error,
    /// Anything else (empty output, profile noise, crash text)
    Unexpected(String),
}

impl ScriptMarker {
    /// Parse the script's stdout; the marker is the last non-empty line
    pub fn parse(stdout: &str) -> Self {
        let last = stdout
            .lines()
            .map(str::trim)
            .rev()
            .find(|l| !l.is_empty())
            .unwrap_or("");

        match last {
            "success" => ScriptMarker::Success,
            "no-image" => ScriptMarker::NoImage,
            "error" => ScriptMarker::Error,
            other => ScriptMarker::Unexpected(other.to_string()),
        }
    }
}

/// Build the script that saves the clipboard bitmap as PNG to `windows_path`
pub fn clipboard_script(windows_path: &str) -> String {
    // Single-quoted PowerShell literal: only ' needs escaping, by doubling
    let quoted = windows_path.replace('\'', "''");
    format!(
        "try {{ \
Add-Type -AssemblyName System.Windows.Forms; \
Add-Type -AssemblyName System.Drawing; \
$clipboard = [System.Windows.Forms.Clipboard]::GetDataObject(); \
if ($clipboard -and $clipboard.GetDataPresent([System.Windows.Forms.DataFormats]::Bitmap)) {{ \
$image = $clipboard.GetData([System.Windows.Forms.DataFormats]::Bitmap); \
$image.Save('{}', [System.Drawing.Imaging.ImageFormat]::Png); \
Write-Output 'success'; \
}} else {{ \
Write-Output 'no-image'; \
}} \
}} catch {{ \
Write-Output 'error'; \
}}",
        quoted
    )
}

/// Full PowerShell invocation for the clipboard script
pub(crate) fn clipboard_command(windows_path: &str) -> CommandSpec {
    CommandSpec::new(POWERSHELL).args([
        "-NoProfile".to_string(),
        "-NonInteractive".to_string(),
        "-STA".to_string(),
        "-Command".to_string(),
        clipboard_script(windows_path),
    ])
}
