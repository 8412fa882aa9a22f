//! Tool availability port interface

use std::sync::Arc;

use async_trait::async_trait;

/// Port for checking whether a helper binary is on `PATH`
#[async_trait]
pub trait ToolProbe: Send + Sync {
    /// Check whether `name` resolves to an executable.
    ///
    /// # Returns
    /// true iff the lookup succeeded; lookup failures are `false`, never errors
    async fn has_command(&self, name: &str) -> bool;
}

/// Blanket implementation for shared probes
#[async_trait]
impl<T: ToolProbe + ?Sized> ToolProbe for Arc<T> {
    async fn has_command(&self, name: &str) -> bool {
        self.as_ref().has_command(name).await
    }
}
