//! Daemon app runner
//!
//! The daemon hosts one temp file tracker for its whole lifetime and
//! serves paste requests over local IPC. Tracked files are deleted on
//! their own timers or all at once when the daemon stops.

use std::process::ExitCode;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use log::{debug, info};

use crate::application::{PasteImageUseCase, PasteInput};
use crate::domain::daemon::DaemonSession;
use crate::domain::environment::{detect_current, EnvironmentContext};
use crate::domain::image::portable_path;

use super::app::{build_use_case, describe_failure, EXIT_ERROR, EXIT_SUCCESS};
use super::args::DaemonOptions;
use super::ipc::{create_ipc_server, CommandHandler};
#[cfg(unix)]
use super::pid_file::PidFile;
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Protocol handler shared by every IPC connection
pub struct DaemonService {
    use_case: PasteImageUseCase,
    input: PasteInput,
    session: Mutex<DaemonSession>,
    detect: fn() -> EnvironmentContext,
}

impl DaemonService {
    /// Create a service detecting the environment per request
    pub fn new(use_case: PasteImageUseCase, input: PasteInput) -> Self {
        Self::with_detector(use_case, input, detect_current)
    }

    /// Create a service with a custom environment detector
    pub fn with_detector(
        use_case: PasteImageUseCase,
        input: PasteInput,
        detect: fn() -> EnvironmentContext,
    ) -> Self {
        Self {
            use_case,
            input,
            session: Mutex::new(DaemonSession::new()),
            detect,
        }
    }

    fn session(&self) -> std::sync::MutexGuard<'_, DaemonSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn paste(&self) -> String {
        self.session().begin();
        let result = self
            .use_case
            .execute_in((self.detect)(), self.input.clone())
            .await;
        self.session().finish(result.is_ok());

        match result {
            Ok(output) => {
                info!("Served paste: {}", output.path.display());
                format!("ok {}", portable_path(&output.path))
            }
            Err(e) => {
                debug!("Paste request failed: {}", e);
                format!("error: {}", describe_failure(&e))
            }
        }
    }

    /// `<state> tracked=<n> pasted=<m> failed=<k>`
    pub fn status_line(&self) -> String {
        let session = self.session().clone();
        format!(
            "{} tracked={} pasted={} failed={}",
            session.state(),
            self.use_case.tracker().tracked_count(),
            session.pasted(),
            session.failed()
        )
    }

    /// Delete every tracked file now
    pub fn cleanup(&self) -> usize {
        self.use_case.tracker().cancel_all()
    }
}

#[async_trait]
impl CommandHandler for DaemonService {
    async fn handle(&self, command: &str) -> String {
        match command {
            "paste" => self.paste().await,
            "status" => self.status_line(),
            "cleanup" => format!("ok {}", self.cleanup()),
            _ => "error: unknown command".to_string(),
        }
    }
}

/// Run daemon mode
pub async fn run_daemon(options: DaemonOptions) -> ExitCode {
    let presenter = Presenter::new();

    #[cfg(unix)]
    let pid_file = {
        let pid_file = PidFile::new();
        if let Err(e) = pid_file.acquire() {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        pid_file
    };

    let shutdown = ShutdownSignal::new();
    if let Err(e) = shutdown.setup().await {
        presenter.error(&format!("Failed to setup signal handler: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    let service = Arc::new(DaemonService::new(
        build_use_case(options.helper_timeout),
        PasteInput {
            output_dir: options.output_dir.clone(),
            file_prefix: options.file_prefix.clone(),
            retention: options.retention,
        },
    ));

    let mut server = create_ipc_server();
    if let Err(e) = server.bind() {
        presenter.error(&format!("Failed to bind {}: {}", server.path(), e));
        return ExitCode::from(EXIT_ERROR);
    }
    let endpoint = server.path();

    let mut server_task = {
        let handler: Arc<dyn CommandHandler> = service.clone();
        let shutdown = shutdown.clone();
        tokio::spawn(async move { server.run(handler, shutdown).await })
    };

    presenter.daemon_status("Started, waiting for commands...");
    presenter.info(&format!(
        "PID: {} | Endpoint: {} | Output: {} | Retention: {}",
        std::process::id(),
        endpoint,
        options.output_dir.display(),
        options.retention
    ));

    let exit = tokio::select! {
        _ = shutdown.wait() => {
            presenter.daemon_status("Shutting down...");
            // The server sees the same signal and cancels requests in progress
            match (&mut server_task).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => presenter.error(&format!("IPC server stopped: {}", e)),
                Err(e) => presenter.error(&format!("IPC server task failed: {}", e)),
            }
            EXIT_SUCCESS
        }
        result = &mut server_task => {
            match result {
                Ok(Err(e)) => presenter.error(&format!("IPC server stopped: {}", e)),
                Ok(Ok(())) => presenter.error("IPC server stopped"),
                Err(e) => presenter.error(&format!("IPC server task failed: {}", e)),
            }
            EXIT_ERROR
        }
    };

    let removed = service.cleanup();
    if removed > 0 {
        presenter.info(&format!("Deleted {} tracked file(s)", removed));
    }

    #[cfg(unix)]
    let _ = pid_file.release();

    ExitCode::from(exit)
}
