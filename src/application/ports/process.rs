//! Process runner port interface

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::retention::Duration;

/// Process runner errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Failed to start {program}: {message}")]
    SpawnFailed { program: String, message: String },

    #[error("I/O error while running {program}: {message}")]
    Io { program: String, message: String },

    #[error("{program} did not finish within {after}")]
    TimedOut { program: String, after: Duration },
}

/// A helper command to spawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a command with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Terminal status of a helper process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    /// Exit code, `None` when killed by a signal
    pub code: Option<i32>,
}

impl ProcessStatus {
    /// Status for an exit code
    pub const fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Whether the process exited with status 0
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Result of a helper process whose stdout was captured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub status: ProcessStatus,
    pub stdout: Vec<u8>,
}

/// Port for spawning helper processes.
///
/// Each call suspends until the child's single terminal event and resolves
/// to a typed result.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run a command and capture its stdout.
    async fn output(&self, command: &CommandSpec) -> Result<ProcessOutput, ProcessError>;

    /// Run a command, streaming its stdout into `destination`.
    ///
    /// The destination is created only once the process has started.
    async fn output_to_file(
        &self,
        command: &CommandSpec,
        destination: &Path,
    ) -> Result<ProcessStatus, ProcessError>;
}

/// Blanket implementation for shared runners
#[async_trait]
impl<T: ProcessRunner + ?Sized> ProcessRunner for Arc<T> {
    async fn output(&self, command: &CommandSpec) -> Result<ProcessOutput, ProcessError> {
        self.as_ref().output(command).await
    }

    async fn output_to_file(
        &self,
        command: &CommandSpec,
        destination: &Path,
    ) -> Result<ProcessStatus, ProcessError> {
        self.as_ref().output_to_file(command, destination).await
    }
}
