//! clipimg - save the clipboard image to a temporary PNG
//!
//! This crate reads the image currently on the system clipboard through the
//! platform's native helper (PowerShell, xclip, wl-paste or pngpaste), writes
//! it to a uniquely named PNG file and deletes that file again after a
//! retention period or when the process shuts down.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Environment detection, destinations, retention durations, config
//! - **Application**: Acquisition strategies, the dispatcher, the temp file
//!   tracker, the paste use case and the port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (tokio processes, `which`, XDG config)
//! - **CLI**: Command-line interface, daemon, IPC and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
