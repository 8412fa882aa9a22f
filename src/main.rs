//! clipimg CLI entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

use clipimg::cli::{
    app::{load_merged_config, run_paste, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands, DaemonAction, PasteArgs},
    config_cmd::handle_config_command,
    daemon_app::run_daemon,
    daemon_cmd::handle_daemon_command,
    detect_cmd::handle_detect_command,
    presenter::Presenter,
    PasteOptions,
};
use clipimg::domain::config::AppConfig;
use clipimg::domain::image::validate_prefix;
use clipimg::domain::retention::Duration;
use clipimg::infrastructure::{WhichProbe, XdgConfigStore};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::Detect { json } => {
            if let Err(e) = handle_detect_command(json, &WhichProbe::new(), &presenter).await {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::Daemon {
            action: DaemonAction::Start,
        } => match resolve_options(PasteArgs::default(), &presenter).await {
            Ok(options) => run_daemon(options.into()).await,
            Err(code) => code,
        },
        Commands::Daemon { action } => {
            if let Err(e) = handle_daemon_command(action, &presenter).await {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::Paste(args) => match resolve_options(args, &presenter).await {
            Ok(options) => run_paste(options).await,
            Err(code) => code,
        },
    }
}

/// Merge CLI flags with env and the config file, then parse the result
async fn resolve_options(args: PasteArgs, presenter: &Presenter) -> Result<PasteOptions, ExitCode> {
    let cli_config = AppConfig {
        output_dir: args.output_dir,
        retention: args.retention,
        file_prefix: args.prefix,
        helper_timeout: None, // helper timeout comes from env/file only
    };

    let config = load_merged_config(cli_config).await;

    let retention = parse_duration("retention", config.retention.as_deref(), presenter)?
        .unwrap_or_else(Duration::default_retention);
    let helper_timeout =
        parse_duration("helper timeout", config.helper_timeout.as_deref(), presenter)?
            .unwrap_or_else(Duration::default_helper_timeout);

    let file_prefix = match config.file_prefix.as_deref() {
        Some(prefix) => {
            if let Err(e) = validate_prefix(prefix) {
                presenter.error(&e.to_string());
                return Err(ExitCode::from(EXIT_USAGE_ERROR));
            }
            prefix.to_string()
        }
        None => config.file_prefix_or_default().to_string(),
    };

    let output_dir: PathBuf = config.output_dir_or_default();

    Ok(PasteOptions {
        output_dir,
        file_prefix,
        retention,
        helper_timeout,
        local: args.local,
    })
}

fn parse_duration(
    label: &str,
    value: Option<&str>,
    presenter: &Presenter,
) -> Result<Option<Duration>, ExitCode> {
    match value {
        Some(s) => match s.parse::<Duration>() {
            Ok(d) => Ok(Some(d)),
            Err(e) => {
                presenter.error(&format!("Invalid {}: {}", label, e));
                Err(ExitCode::from(EXIT_USAGE_ERROR))
            }
        },
        None => Ok(None),
    }
}
