//! Retention and timeout durations

pub mod duration;

pub use duration::{Duration, DEFAULT_HELPER_TIMEOUT_SECS, DEFAULT_RETENTION_SECS};
