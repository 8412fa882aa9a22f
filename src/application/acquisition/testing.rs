//! Scripted test doubles for the process and probe ports

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{
    CommandSpec, ProcessError, ProcessOutput, ProcessRunner, ProcessStatus, ToolProbe,
};

/// What a scripted program does when run
#[derive(Debug, Clone)]
pub(crate) enum Script {
    /// Spawn fails with NotFound
    Missing,
    /// Exits with `code`; `stdout` goes to the caller (or the destination
    /// file for streamed runs); `writes` simulates a file the program saves
    Runs {
        code: i32,
        stdout: Vec<u8>,
        writes: Option<(PathBuf, Vec<u8>)>,
    },
}

impl Script {
    pub(crate) fn exits(code: i32, stdout: &[u8]) -> Self {
        Script::Runs {
            code,
            stdout: stdout.to_vec(),
            writes: None,
        }
    }

    pub(crate) fn exits_writing(code: i32, stdout: &[u8], path: &Path, bytes: &[u8]) -> Self {
        Script::Runs {
            code,
            stdout: stdout.to_vec(),
            writes: Some((path.to_path_buf(), bytes.to_vec())),
        }
    }
}

/// Process runner that replays scripted behaviour per program name.
/// Unscripted programs behave as missing.
#[derive(Default)]
pub(crate) struct ScriptedRunner {
    scripts: HashMap<String, Script>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, program: &str, script: Script) -> Self {
        self.scripts.insert(program.to_string(), script);
        self
    }

    pub(crate) fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn programs_called(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.program).collect()
    }

    fn script_for(&self, command: &CommandSpec) -> Script {
        self.calls.lock().unwrap().push(command.clone());
        self.scripts
            .get(&command.program)
            .cloned()
            .unwrap_or(Script::Missing)
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn output(&self, command: &CommandSpec) -> Result<ProcessOutput, ProcessError> {
        match self.script_for(command) {
            Script::Missing => Err(ProcessError::NotFound(command.program.clone())),
            Script::Runs {
                code,
                stdout,
                writes,
            } => {
                if let Some((path, bytes)) = writes {
                    std::fs::write(path, bytes).unwrap();
                }
                Ok(ProcessOutput {
                    status: ProcessStatus::exited(code),
                    stdout,
                })
            }
        }
    }

    async fn output_to_file(
        &self,
        command: &CommandSpec,
        destination: &Path,
    ) -> Result<ProcessStatus, ProcessError> {
        match self.script_for(command) {
            Script::Missing => Err(ProcessError::NotFound(command.program.clone())),
            Script::Runs { code, stdout, .. } => {
                std::fs::write(destination, stdout).unwrap();
                Ok(ProcessStatus::exited(code))
            }
        }
    }
}

/// Tool probe answering from a fixed set of installed tools
#[derive(Default)]
pub(crate) struct FakeProbe {
    installed: HashSet<String>,
}

impl FakeProbe {
    pub(crate) fn with_tools(tools: &[&str]) -> Self {
        Self {
            installed: tools.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[async_trait]
impl ToolProbe for FakeProbe {
    async fn has_command(&self, name: &str) -> bool {
        self.installed.contains(name)
    }
}
