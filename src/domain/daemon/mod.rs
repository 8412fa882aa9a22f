//! Daemon session state

mod session;

pub use session::{DaemonSession, DaemonState};
