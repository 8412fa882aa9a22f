//! Shutdown signal handling for paste and daemon modes

use std::io;
use std::sync::Arc;

use log::debug;
use tokio::sync::watch;

/// Resolves once the process is asked to stop.
///
/// SIGINT and SIGTERM on Unix, Ctrl-C on Windows. Clones share one flag.
#[derive(Clone)]
pub struct ShutdownSignal {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Create a new shutdown signal handler
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    /// Check if shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        *self.rx.borrow()
    }

    /// Request shutdown from inside the process
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    /// Install the OS signal listeners
    #[cfg(unix)]
    pub async fn setup(&self) -> io::Result<()> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;
        let tx = Arc::clone(&self.tx);

        tokio::spawn(async move {
            let name = tokio::select! {
                _ = sigint.recv() => "SIGINT",
                _ = sigterm.recv() => "SIGTERM",
            };
            debug!("Received {}", name);
            tx.send_replace(true);
        });

        Ok(())
    }

    /// Install the OS signal listeners
    #[cfg(not(unix))]
    pub async fn setup(&self) -> io::Result<()> {
        let tx = Arc::clone(&self.tx);

        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("Received Ctrl-C");
                tx.send_replace(true);
            }
        });

        Ok(())
    }

    /// Wait until shutdown is requested
    pub async fn wait(&self) {
        let mut rx = self.rx.clone();
        // The sender lives in self, so the channel cannot close while waiting
        let _ = rx.wait_for(|stop| *stop).await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
