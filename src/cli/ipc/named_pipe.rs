//! Named Pipe communication for daemon control on Windows

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::net::windows::named_pipe::{ClientOptions, ServerOptions};
use tokio::task::JoinSet;

use super::{request, serve_connection, CommandHandler, IpcClient, IpcServer};
use crate::cli::signals::ShutdownSignal;

/// Named pipe path
const PIPE_NAME: &str = r"\\.\pipe\clipimg";

/// Named pipe path resolver
#[derive(Debug, Clone)]
pub struct PipePath {
    path: String,
}

impl PipePath {
    /// Create the default pipe path
    pub fn new() -> Self {
        Self {
            path: PIPE_NAME.to_string(),
        }
    }

    /// Get the pipe path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Check if named pipe exists
    pub fn exists(&self) -> bool {
        std::fs::metadata(&self.path).is_ok()
    }
}

impl Default for PipePath {
    fn default() -> Self {
        Self::new()
    }
}

/// Named Pipe server for daemon commands
pub struct NamedPipeServer {
    pipe_path: PipePath,
    bound: bool,
}

impl NamedPipeServer {
    /// Create a new pipe server
    pub fn new(pipe_path: PipePath) -> Self {
        Self {
            pipe_path,
            bound: false,
        }
    }
}

#[async_trait]
impl IpcServer for NamedPipeServer {
    fn bind(&mut self) -> io::Result<()> {
        // Pipe instances are created per connection in `run`
        self.bound = true;
        Ok(())
    }

    fn path(&self) -> String {
        self.pipe_path.path().to_string()
    }

    async fn run(
        &self,
        handler: Arc<dyn CommandHandler>,
        shutdown: ShutdownSignal,
    ) -> io::Result<()> {
        if !self.bound {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "Pipe not bound"));
        }

        let mut connections = JoinSet::new();

        let result = loop {
            let server = match ServerOptions::new()
                .first_pipe_instance(false)
                .create(&self.pipe_path.path)
            {
                Ok(server) => server,
                Err(e) => break Err(e),
            };

            tokio::select! {
                _ = shutdown.wait() => break Ok(()),
                connected = server.connect() => {
                    if let Err(e) = connected {
                        break Err(e);
                    }
                    let handler = Arc::clone(&handler);
                    connections.spawn(async move {
                        if let Err(e) = serve_connection(server, handler).await {
                            warn!("Pipe connection error: {}", e);
                        }
                    });
                }
            }

            while connections.try_join_next().is_some() {}
        };

        if !connections.is_empty() {
            debug!("Cancelling {} open connection(s)", connections.len());
        }
        connections.shutdown().await;

        result
    }

    fn cleanup(&self) {
        // Named pipes disappear with their last server instance
    }
}

/// Named Pipe client for sending commands to daemon
pub struct NamedPipeClient {
    pipe_path: PipePath,
}

impl NamedPipeClient {
    /// Create a new pipe client
    pub fn new(pipe_path: PipePath) -> Self {
        Self { pipe_path }
    }
}

#[async_trait]
impl IpcClient for NamedPipeClient {
    fn is_daemon_running(&self) -> bool {
        self.pipe_path.exists()
    }

    async fn send_command(&self, cmd: &str) -> io::Result<String> {
        let client = ClientOptions::new().open(&self.pipe_path.path)?;
        request(client, cmd).await
    }
}
