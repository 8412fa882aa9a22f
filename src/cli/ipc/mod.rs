//! IPC (Inter-Process Communication) module for daemon control
//!
//! One line per request and one line per response.
//! Provides platform-specific implementations:
//! - Unix (Linux/macOS): Unix Domain Sockets
//! - Windows: Named Pipes

#[cfg(windows)]
mod named_pipe;
#[cfg(unix)]
mod unix_socket;

#[cfg(windows)]
pub use named_pipe::{NamedPipeClient, NamedPipeServer, PipePath};
#[cfg(unix)]
pub use unix_socket::{SocketPath, UnixSocketClient, UnixSocketServer};

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use super::signals::ShutdownSignal;

/// Answers one protocol line with one response line
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Handle a trimmed command; the response carries no trailing newline
    async fn handle(&self, command: &str) -> String;
}

/// Trait for IPC servers that listen for daemon commands
#[async_trait]
pub trait IpcServer: Send + Sync {
    /// Bind to the IPC endpoint
    fn bind(&mut self) -> io::Result<()>;

    /// Get the path/name of the IPC endpoint
    fn path(&self) -> String;

    /// Accept connections and answer each command through `handler` until
    /// `shutdown` fires.
    ///
    /// Connections are served concurrently. Before returning, requests still
    /// in progress are cancelled and awaited, so none outlives the server.
    async fn run(&self, handler: Arc<dyn CommandHandler>, shutdown: ShutdownSignal)
        -> io::Result<()>;

    /// Cleanup IPC resources
    fn cleanup(&self);
}

/// Trait for IPC clients that send commands to the daemon
#[async_trait]
pub trait IpcClient: Send + Sync {
    /// Check if daemon appears to be running (endpoint exists)
    fn is_daemon_running(&self) -> bool;

    /// Send a command and receive response
    async fn send_command(&self, cmd: &str) -> io::Result<String>;
}

/// Read one command, answer it, flush
pub(crate) async fn serve_connection<T>(stream: T, handler: Arc<dyn CommandHandler>) -> io::Result<()>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, mut writer) = tokio::io::split(stream);
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    reader.read_line(&mut line).await?;
    let response = handler.handle(line.trim()).await;

    writer.write_all(format!("{}\n", response).as_bytes()).await?;
    writer.flush().await?;
    writer.shutdown().await?;

    Ok(())
}

/// Send one command line over `stream` and read the response line
pub(crate) async fn request<T>(stream: T, cmd: &str) -> io::Result<String>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, mut writer) = tokio::io::split(stream);

    writer.write_all(format!("{}\n", cmd).as_bytes()).await?;
    writer.flush().await?;

    let mut reader = BufReader::new(reader);
    let mut response = String::new();
    reader.read_line(&mut response).await?;

    Ok(response)
}

/// Create the appropriate IPC server for the current platform
#[cfg(unix)]
pub fn create_ipc_server() -> Box<dyn IpcServer> {
    Box::new(UnixSocketServer::new(SocketPath::new()))
}

#[cfg(windows)]
pub fn create_ipc_server() -> Box<dyn IpcServer> {
    Box::new(NamedPipeServer::new(PipePath::new()))
}

/// Create the appropriate IPC client for the current platform
#[cfg(unix)]
pub fn create_ipc_client() -> Box<dyn IpcClient> {
    Box::new(UnixSocketClient::new(SocketPath::new()))
}

#[cfg(windows)]
pub fn create_ipc_client() -> Box<dyn IpcClient> {
    Box::new(NamedPipeClient::new(PipePath::new()))
}
