//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::retention::Duration;

/// clipimg - paste clipboard images into temporary PNG files
#[derive(Parser, Debug)]
#[command(name = "clipimg")]
#[command(version)]
#[command(about = "Save the clipboard image to a temporary PNG and print its path")]
#[command(long_about = None)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save the clipboard image and print its path
    Paste(PasteArgs),
    /// Show the detected environment and available helpers
    Detect {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Run or control the background daemon
    Daemon {
        #[command(subcommand)]
        action: DaemonAction,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for `clipimg paste`
#[derive(Args, Debug, Default, Clone)]
pub struct PasteArgs {
    /// Directory the image is written to
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// How long the file is kept (e.g., 90s, 10m, 1h)
    #[arg(short = 'r', long, value_name = "TIME")]
    pub retention: Option<String>,

    /// File name prefix
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Never forward to a running daemon
    #[arg(long)]
    pub local: bool,
}

/// Daemon actions
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonAction {
    /// Run the daemon in the foreground
    Start,
    /// Ask the daemon to paste the clipboard image
    Paste,
    /// Show daemon status
    Status,
    /// Delete every file the daemon is tracking
    Cleanup,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed paste options
#[derive(Debug, Clone)]
pub struct PasteOptions {
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub retention: Duration,
    pub helper_timeout: Duration,
    pub local: bool,
}

/// Parsed daemon options
#[derive(Debug, Clone)]
pub struct DaemonOptions {
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub retention: Duration,
    pub helper_timeout: Duration,
}

impl From<PasteOptions> for DaemonOptions {
    fn from(options: PasteOptions) -> Self {
        Self {
            output_dir: options.output_dir,
            file_prefix: options.file_prefix,
            retention: options.retention,
            helper_timeout: options.helper_timeout,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["output_dir", "retention", "file_prefix", "helper_timeout"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_paste_defaults() {
        let cli = Cli::parse_from(["clipimg", "paste"]);
        assert!(!cli.verbose);
        match cli.command {
            Commands::Paste(args) => {
                assert!(args.output_dir.is_none());
                assert!(args.retention.is_none());
                assert!(args.prefix.is_none());
                assert!(!args.local);
            }
            other => panic!("Expected paste, got {:?}", other),
        }
    }

    #[test]
    fn cli_parses_paste_options() {
        let cli = Cli::parse_from([
            "clipimg", "paste", "-o", "/tmp/shots", "-r", "90s", "--prefix", "shot", "--local",
        ]);
        match cli.command {
            Commands::Paste(args) => {
                assert_eq!(args.output_dir.as_deref(), Some("/tmp/shots"));
                assert_eq!(args.retention.as_deref(), Some("90s"));
                assert_eq!(args.prefix.as_deref(), Some("shot"));
                assert!(args.local);
            }
            other => panic!("Expected paste, got {:?}", other),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::parse_from(["clipimg", "detect", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Detect { json: false }));
    }

    #[test]
    fn cli_parses_daemon_actions() {
        for (arg, action) in [
            ("start", DaemonAction::Start),
            ("paste", DaemonAction::Paste),
            ("status", DaemonAction::Status),
            ("cleanup", DaemonAction::Cleanup),
        ] {
            let cli = Cli::parse_from(["clipimg", "daemon", arg]);
            assert!(matches!(cli.command, Commands::Daemon { action: a } if a == action));
        }
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["clipimg", "config", "set", "retention", "5m"]);
        if let Commands::Config {
            action: ConfigAction::Set { key, value },
        } = cli.command
        {
            assert_eq!(key, "retention");
            assert_eq!(value, "5m");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["clipimg"]).is_err());
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("output_dir"));
        assert!(is_valid_config_key("helper_timeout"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
