//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::image::{validate_prefix, DEFAULT_FILE_PREFIX};
use crate::domain::retention::Duration;

/// Directory name used under the system temp dir
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "clipboard";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub output_dir: Option<String>,
    pub retention: Option<String>,
    pub file_prefix: Option<String>,
    pub helper_timeout: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            output_dir: Some(default_output_dir().to_string_lossy().to_string()),
            retention: Some(Duration::default_retention().to_string()),
            file_prefix: Some(DEFAULT_FILE_PREFIX.to_string()),
            helper_timeout: Some(Duration::default_helper_timeout().to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            output_dir: other.output_dir.or(self.output_dir),
            retention: other.retention.or(self.retention),
            file_prefix: other.file_prefix.or(self.file_prefix),
            helper_timeout: other.helper_timeout.or(self.helper_timeout),
        }
    }

    /// Get output directory, or `<temp>/clipboard` if not set
    pub fn output_dir_or_default(&self) -> PathBuf {
        self.output_dir
            .as_ref()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_output_dir)
    }

    /// Get retention as parsed Duration, or default if not set/invalid
    pub fn retention_or_default(&self) -> Duration {
        self.retention
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_retention)
    }

    /// Get file prefix, or default if not set/invalid
    pub fn file_prefix_or_default(&self) -> &str {
        self.file_prefix
            .as_deref()
            .filter(|p| validate_prefix(p).is_ok())
            .unwrap_or(DEFAULT_FILE_PREFIX)
    }

    /// Get helper timeout as parsed Duration, or default if not set/invalid
    pub fn helper_timeout_or_default(&self) -> Duration {
        self.helper_timeout
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_helper_timeout)
    }
}

/// `<system temp dir>/clipboard`
pub fn default_output_dir() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_OUTPUT_DIR_NAME)
}
