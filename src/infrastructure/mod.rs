//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with helper processes, PATH lookup, the filesystem
//! and the config file.

pub mod config;
pub mod fs;
pub mod probe;
pub mod process;

// Re-export adapters
pub use config::XdgConfigStore;
pub use fs::StdFileRemover;
pub use probe::WhichProbe;
pub use process::TokioProcessRunner;
