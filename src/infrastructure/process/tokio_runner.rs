//! Helper process adapter using tokio::process

use std::future::Future;
use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use log::debug;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::ports::{
    CommandSpec, ProcessError, ProcessOutput, ProcessRunner, ProcessStatus,
};
use crate::domain::retention::Duration;

/// Spawns helpers with tokio, killing any child that outlives the timeout
pub struct TokioProcessRunner {
    timeout: Duration,
}

impl TokioProcessRunner {
    /// Create a runner that kills helpers after `timeout`
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn command(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        cmd
    }

    /// Await `fut`, failing with `TimedOut` once the limit passes.
    /// Dropping the future drops the child, which kills it.
    async fn bounded<T, F>(&self, program: &str, fut: F) -> Result<T, ProcessError>
    where
        F: Future<Output = Result<T, ProcessError>>,
    {
        let limit = self.timeout;
        tokio::time::timeout(limit.as_std(), fut)
            .await
            .map_err(|_| ProcessError::TimedOut {
                program: program.to_string(),
                after: limit,
            })?
    }
}

impl Default for TokioProcessRunner {
    fn default() -> Self {
        Self::new(Duration::default_helper_timeout())
    }
}

fn spawn_error(program: &str, e: io::Error) -> ProcessError {
    if e.kind() == io::ErrorKind::NotFound {
        ProcessError::NotFound(program.to_string())
    } else {
        ProcessError::SpawnFailed {
            program: program.to_string(),
            message: e.to_string(),
        }
    }
}

fn io_error(program: &str, e: io::Error) -> ProcessError {
    ProcessError::Io {
        program: program.to_string(),
        message: e.to_string(),
    }
}

fn status_of(status: ExitStatus) -> ProcessStatus {
    ProcessStatus {
        code: status.code(),
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn output(&self, spec: &CommandSpec) -> Result<ProcessOutput, ProcessError> {
        let program = spec.program.as_str();
        debug!("Running {}", spec.program);

        let child = Self::command(spec)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(program, e))?;

        let output = self
            .bounded(program, async {
                child
                    .wait_with_output()
                    .await
                    .map_err(|e| io_error(program, e))
            })
            .await?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!("{} stderr: {}", program, stderr.trim());
        }

        Ok(ProcessOutput {
            status: status_of(output.status),
            stdout: output.stdout,
        })
    }

    async fn output_to_file(
        &self,
        spec: &CommandSpec,
        destination: &Path,
    ) -> Result<ProcessStatus, ProcessError> {
        let program = spec.program.as_str();
        debug!("Running {} > {}", spec.program, destination.display());

        let mut child = Self::command(spec)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| spawn_error(program, e))?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| io_error(program, io::Error::other("stdout was not captured")))?;

        let status = self
            .bounded(program, async {
                let mut file = tokio::fs::File::create(destination)
                    .await
                    .map_err(|e| io_error(program, e))?;
                tokio::io::copy(&mut stdout, &mut file)
                    .await
                    .map_err(|e| io_error(program, e))?;
                file.flush().await.map_err(|e| io_error(program, e))?;
                child.wait().await.map_err(|e| io_error(program, e))
            })
            .await?;

        Ok(status_of(status))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandSpec {
        CommandSpec::new("sh").args(["-c", script])
    }

    #[tokio::test]
    async fn captures_stdout_and_exit_code() {
        let runner = TokioProcessRunner::default();

        let output = runner.output(&sh("printf 'no-image\\n'; exit 3")).await.unwrap();

        assert_eq!(output.status.code, Some(3));
        assert!(!output.status.success());
        assert_eq!(output.stdout, b"no-image\n");
    }

    #[tokio::test]
    async fn missing_program_is_not_found() {
        let runner = TokioProcessRunner::default();

        let err = runner
            .output(&CommandSpec::new("clipimg-definitely-not-installed"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ProcessError::NotFound("clipimg-definitely-not-installed".to_string())
        );
    }

    #[tokio::test]
    async fn streams_stdout_into_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.png");
        let runner = TokioProcessRunner::default();

        let status = runner
            .output_to_file(&sh("printf 'abcdef'"), &dest)
            .await
            .unwrap();

        assert!(status.success());
        assert_eq!(std::fs::read(&dest).unwrap(), b"abcdef");
    }

    #[tokio::test]
    async fn missing_program_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.png");
        let runner = TokioProcessRunner::default();

        let err = runner
            .output_to_file(&CommandSpec::new("clipimg-definitely-not-installed"), &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, ProcessError::NotFound(_)));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn slow_helper_times_out() {
        let runner = TokioProcessRunner::new(Duration::from_millis(200));

        let err = runner.output(&sh("sleep 5")).await.unwrap_err();

        assert_eq!(
            err,
            ProcessError::TimedOut {
                program: "sh".to_string(),
                after: Duration::from_millis(200),
            }
        );
    }
}
