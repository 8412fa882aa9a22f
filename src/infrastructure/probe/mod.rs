//! Tool availability adapters

mod which;

pub use which::WhichProbe;
