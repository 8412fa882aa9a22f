//! PATH lookup adapter using `which` (or `where` on Windows)

use std::process::Stdio;

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use crate::application::ports::ToolProbe;

#[cfg(windows)]
const LOOKUP_COMMAND: &str = "where";
#[cfg(not(windows))]
const LOOKUP_COMMAND: &str = "which";

/// Tool probe that asks the platform lookup command
pub struct WhichProbe {
    lookup: String,
}

impl WhichProbe {
    /// Create a probe using the platform lookup command
    pub fn new() -> Self {
        Self::with_lookup(LOOKUP_COMMAND)
    }

    /// Create a probe using a custom lookup command
    pub fn with_lookup(lookup: impl Into<String>) -> Self {
        Self {
            lookup: lookup.into(),
        }
    }
}

impl Default for WhichProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolProbe for WhichProbe {
    async fn has_command(&self, name: &str) -> bool {
        let found = Command::new(&self.lookup)
            .arg(name)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false);

        debug!("{} {}", name, if found { "found" } else { "not found" });
        found
    }
}
