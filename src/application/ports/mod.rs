//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod file_remover;
pub mod process;
pub mod tool_probe;

// Re-export common types
pub use config::ConfigStore;
pub use file_remover::FileRemover;
pub use process::{CommandSpec, ProcessError, ProcessOutput, ProcessRunner, ProcessStatus};
pub use tool_probe::ToolProbe;
