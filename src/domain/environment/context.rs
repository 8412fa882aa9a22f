//! Runtime environment value objects

use std::fmt;

use serde::Serialize;

/// Operating system family the binary is running on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
    Other,
}

impl Platform {
    /// Platform of the current build target
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }

    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Environment a clipboard acquisition runs in.
///
/// Produced once per request by `detect` and consumed by
/// exhaustive matching in the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnvironmentContext {
    /// Windows without a Linux layer
    NativeWindows,
    /// Linux running under the Windows Subsystem for Linux
    Wsl,
    /// Native Linux, X11 session (or no display hint)
    LinuxX11,
    /// Native Linux, Wayland session
    LinuxWayland,
    /// macOS
    MacOs,
    /// No acquisition strategy exists
    Unsupported,
}

impl EnvironmentContext {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NativeWindows => "native-windows",
            Self::Wsl => "wsl",
            Self::LinuxX11 => "linux-x11",
            Self::LinuxWayland => "linux-wayland",
            Self::MacOs => "macos",
            Self::Unsupported => "unsupported",
        }
    }

    /// Whether any acquisition strategy exists for this environment
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

impl fmt::Display for EnvironmentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_display() {
        assert_eq!(EnvironmentContext::NativeWindows.to_string(), "native-windows");
        assert_eq!(EnvironmentContext::Wsl.to_string(), "wsl");
        assert_eq!(EnvironmentContext::LinuxWayland.to_string(), "linux-wayland");
        assert_eq!(EnvironmentContext::Unsupported.to_string(), "unsupported");
    }

    #[test]
    fn only_unsupported_is_unsupported() {
        assert!(!EnvironmentContext::Unsupported.is_supported());
        assert!(EnvironmentContext::MacOs.is_supported());
    }

    #[test]
    fn context_serializes_kebab_case() {
        let json = serde_json::to_string(&EnvironmentContext::NativeWindows).unwrap();
        assert_eq!(json, "\"native-windows\"");
    }
}
