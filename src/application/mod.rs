//! Application layer - Use cases and port interfaces
//!
//! Contains the acquisition strategies, the dispatcher that routes between
//! them, the temporary file lifecycle, and trait definitions for external
//! system interactions.

pub mod acquisition;
pub mod dispatcher;
pub mod lifecycle;
pub mod paste;
pub mod ports;

// Re-export use cases
pub use acquisition::{AcquireError, AcquisitionStrategy};
pub use dispatcher::AcquisitionDispatcher;
pub use lifecycle::TempFileTracker;
pub use paste::{PasteError, PasteImageUseCase, PasteInput, PasteOutput};
