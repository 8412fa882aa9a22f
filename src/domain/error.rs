//! Domain error types

use thiserror::Error;

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected format: <number>h, <number>m, <number>s or a combination (e.g., 30s, 10m, 1h30m)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when a destination path cannot hold a clipboard image
#[derive(Debug, Clone, Error)]
pub enum DestinationError {
    #[error("Destination must end in .png: {0}")]
    NotPng(String),

    #[error("Destination must be an absolute path: {0}")]
    NotAbsolute(String),

    #[error("Destination already exists: {0}")]
    Exists(String),

    #[error("Cannot reserve destination {path}: {message}")]
    Reserve { path: String, message: String },

    #[error("Invalid file prefix \"{0}\": only letters, digits, '-' and '_' are allowed")]
    InvalidPrefix(String),
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
