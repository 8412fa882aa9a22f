//! Configuration value objects

mod app_config;

pub use app_config::{default_output_dir, AppConfig, DEFAULT_OUTPUT_DIR_NAME};
