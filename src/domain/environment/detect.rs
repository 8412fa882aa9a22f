//! Environment detection
//!
//! Detection is split in two: [`EnvironmentMarkers::from_process`] gathers
//! the raw inputs (environment variables, kernel version text) and
//! [`detect`] classifies them without touching the outside world.

use std::env;
use std::fs;

use super::context::{EnvironmentContext, Platform};

/// Kernel version source consulted for the WSL marker
pub const KERNEL_VERSION_PATH: &str = "/proc/version";

/// Substrings of the lowercase kernel version that identify a WSL kernel
const WSL_KERNEL_MARKERS: &[&str] = &["microsoft", "wsl"];

/// Raw inputs for environment detection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentMarkers {
    /// Platform identifier of the running binary
    pub platform: Option<Platform>,
    /// `WSL_DISTRO_NAME`
    pub wsl_distro_name: Option<String>,
    /// `WSLENV`
    pub wsl_env: Option<String>,
    /// Contents of the kernel version file, if readable
    pub kernel_version: Option<String>,
    /// `WAYLAND_DISPLAY`
    pub wayland_display: Option<String>,
    /// `XDG_SESSION_TYPE`
    pub session_type: Option<String>,
}

impl EnvironmentMarkers {
    /// Snapshot the markers of the current process.
    ///
    /// An unreadable kernel version file is recorded as `None`.
    pub fn from_process() -> Self {
        let platform = Platform::current();
        let kernel_version = match platform {
            Platform::Linux => fs::read_to_string(KERNEL_VERSION_PATH).ok(),
            _ => None,
        };

        Self {
            platform: Some(platform),
            wsl_distro_name: env::var("WSL_DISTRO_NAME").ok(),
            wsl_env: env::var("WSLENV").ok(),
            kernel_version,
            wayland_display: env::var("WAYLAND_DISPLAY").ok(),
            session_type: env::var("XDG_SESSION_TYPE").ok(),
        }
    }

    fn has_wsl_variables(&self) -> bool {
        self.wsl_distro_name.is_some() || self.wsl_env.is_some()
    }

    fn has_wsl_kernel(&self) -> bool {
        self.kernel_version
            .as_deref()
            .map(|text| {
                let lower = text.to_lowercase();
                WSL_KERNEL_MARKERS.iter().any(|m| lower.contains(m))
            })
            .unwrap_or(false)
    }

    fn prefers_wayland(&self) -> bool {
        let wayland_display = self
            .wayland_display
            .as_deref()
            .map(|d| !d.is_empty())
            .unwrap_or(false);
        let wayland_session = self
            .session_type
            .as_deref()
            .map(|t| t.eq_ignore_ascii_case("wayland"))
            .unwrap_or(false);
        wayland_display || wayland_session
    }
}

/// Classify the environment from a marker snapshot.
///
/// WSL variables win, then the kernel version marker, then the platform.
pub fn detect(markers: &EnvironmentMarkers) -> EnvironmentContext {
    if markers.has_wsl_variables() || markers.has_wsl_kernel() {
        return EnvironmentContext::Wsl;
    }

    match markers.platform {
        Some(Platform::Windows) => EnvironmentContext::NativeWindows,
        Some(Platform::Linux) if markers.prefers_wayland() => EnvironmentContext::LinuxWayland,
        Some(Platform::Linux) => EnvironmentContext::LinuxX11,
        Some(Platform::MacOs) => EnvironmentContext::MacOs,
        Some(Platform::Other) | None => EnvironmentContext::Unsupported,
    }
}

/// Detect the environment of the current process
pub fn detect_current() -> EnvironmentContext {
    detect(&EnvironmentMarkers::from_process())
}
