//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod daemon;
pub mod environment;
pub mod error;
pub mod image;
pub mod retention;

// Re-export common types
pub use config::AppConfig;
pub use daemon::{DaemonSession, DaemonState};
pub use environment::{detect, EnvironmentContext, EnvironmentMarkers, Platform};
pub use error::*;
pub use image::ImageDestination;
pub use retention::Duration;
