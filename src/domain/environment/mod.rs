//! Runtime environment detection

mod context;
mod detect;

pub use context::{EnvironmentContext, Platform};
pub use detect::{detect, detect_current, EnvironmentMarkers, KERNEL_VERSION_PATH};
