//! Main app runner for one-shot paste mode

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use log::debug;

use crate::application::ports::ConfigStore;
use crate::application::{
    AcquisitionDispatcher, PasteError, PasteImageUseCase, PasteInput, TempFileTracker,
};
use crate::domain::config::AppConfig;
use crate::domain::image::portable_path;
use crate::domain::retention::Duration;
use crate::infrastructure::{StdFileRemover, TokioProcessRunner, WhichProbe, XdgConfigStore};

use super::args::PasteOptions;
use super::daemon_cmd::parse_response;
use super::ipc::create_ipc_client;
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Message for every acquisition failure
pub const NO_IMAGE_MESSAGE: &str =
    "No image found in clipboard. Copy an image first, then try again.";

/// Environment variable overriding `output_dir`
pub const ENV_OUTPUT_DIR: &str = "CLIPIMG_OUTPUT_DIR";

/// Environment variable overriding `retention`
pub const ENV_RETENTION: &str = "CLIPIMG_RETENTION";

/// Wire the production adapters into a paste use case
pub fn build_use_case(helper_timeout: Duration) -> PasteImageUseCase {
    let dispatcher = AcquisitionDispatcher::new(
        Arc::new(TokioProcessRunner::new(helper_timeout)),
        Arc::new(WhichProbe::new()),
    );
    PasteImageUseCase::new(
        Arc::new(dispatcher),
        TempFileTracker::new(Arc::new(StdFileRemover)),
    )
}

/// User-facing text for a paste failure
pub fn describe_failure(error: &PasteError) -> String {
    match error {
        PasteError::Acquire(_) => NO_IMAGE_MESSAGE.to_string(),
        other => other.to_string(),
    }
}

/// Run a paste: through the daemon when one answers, otherwise in-process
pub async fn run_paste(options: PasteOptions) -> ExitCode {
    let presenter = Presenter::new();

    if !options.local {
        if let Some(code) = forward_to_daemon(&presenter).await {
            return code;
        }
    }

    run_local_paste(options).await
}

/// Ask a running daemon to paste. `None` means no daemon answered.
async fn forward_to_daemon(presenter: &Presenter) -> Option<ExitCode> {
    let client = create_ipc_client();
    if !client.is_daemon_running() {
        return None;
    }

    let response = match client.send_command("paste").await {
        Ok(response) => response,
        Err(e) => {
            debug!("Daemon did not answer, pasting locally: {}", e);
            return None;
        }
    };

    match parse_response(&response) {
        Ok(path) => {
            presenter.output(path);
            Some(ExitCode::from(EXIT_SUCCESS))
        }
        Err(message) => {
            presenter.error(&message);
            Some(ExitCode::from(EXIT_ERROR))
        }
    }
}

async fn run_local_paste(options: PasteOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let shutdown = ShutdownSignal::new();
    if let Err(e) = shutdown.setup().await {
        presenter.error(&format!("Failed to setup signal handler: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    let use_case = build_use_case(options.helper_timeout);
    let input = PasteInput {
        output_dir: options.output_dir,
        file_prefix: options.file_prefix,
        retention: options.retention,
    };

    presenter.start_spinner("Reading clipboard...");
    let output = match use_case.execute(input).await {
        Ok(output) => output,
        Err(e) => {
            presenter.stop_spinner();
            debug!("Paste failed: {}", e);
            presenter.error(&describe_failure(&e));
            return ExitCode::from(EXIT_ERROR);
        }
    };
    presenter.spinner_success(&format!("Saved clipboard image ({})", output.context));

    presenter.output(&portable_path(&output.path));
    presenter.info(&presenter.format_hold_notice(output.retention));

    tokio::select! {
        _ = tokio::time::sleep(output.retention.as_std()) => {}
        _ = shutdown.wait() => {}
    }

    let removed = use_case.tracker().cancel_all();
    debug!("Shutdown cleanup removed {} file(s)", removed);

    ExitCode::from(EXIT_SUCCESS)
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|e| {
        debug!("Ignoring config file: {}", e);
        AppConfig::empty()
    });

    let env_config = AppConfig {
        output_dir: env::var(ENV_OUTPUT_DIR).ok().filter(|s| !s.is_empty()),
        retention: env::var(ENV_RETENTION).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AcquireError;
    use crate::domain::error::DestinationError;

    #[test]
    fn acquisition_failures_share_one_message() {
        for err in [
            AcquireError::NoImage,
            AcquireError::ToolAbsent("xclip".to_string()),
            AcquireError::tool_failed("wl-paste", "exit code 1"),
        ] {
            assert_eq!(describe_failure(&PasteError::Acquire(err)), NO_IMAGE_MESSAGE);
        }
    }

    #[test]
    fn non_acquisition_failures_keep_their_cause() {
        let err = PasteError::Destination(DestinationError::InvalidPrefix("a b".to_string()));
        assert!(describe_failure(&err).contains("Invalid file prefix"));
    }
}
