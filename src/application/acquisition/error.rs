//! Acquisition failure taxonomy

use thiserror::Error;

use crate::application::ports::ProcessError;
use crate::domain::environment::EnvironmentContext;
use crate::domain::retention::Duration;

/// Why a clipboard image could not be acquired.
///
/// Callers of the boolean API only see `false`; the variants exist for
/// logging and tests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AcquireError {
    #[error("Clipboard images are not supported in this environment ({0})")]
    Unsupported(EnvironmentContext),

    #[error("No image found in clipboard")]
    NoImage,

    #[error("{0} is not installed")]
    ToolAbsent(String),

    #[error("{tool} failed: {detail}")]
    ToolFailed { tool: String, detail: String },

    #[error("{0} produced no image data")]
    EmptyOutput(String),

    #[error("{tool} did not finish within {after}")]
    TimedOut { tool: String, after: Duration },

    #[error("Filesystem error: {0}")]
    Filesystem(String),
}

impl AcquireError {
    /// Failure from a helper that ran but did not succeed
    pub fn tool_failed(tool: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            detail: detail.into(),
        }
    }

    /// Whether the failure means the helper binary does not exist
    pub fn is_tool_absent(&self) -> bool {
        matches!(self, Self::ToolAbsent(_))
    }
}

impl From<ProcessError> for AcquireError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::NotFound(program) => AcquireError::ToolAbsent(program),
            ProcessError::SpawnFailed { program, message } => AcquireError::ToolFailed {
                tool: program,
                detail: message,
            },
            ProcessError::Io { program, message } => AcquireError::ToolFailed {
                tool: program,
                detail: message,
            },
            ProcessError::TimedOut { program, after } => AcquireError::TimedOut {
                tool: program,
                after,
            },
        }
    }
}
