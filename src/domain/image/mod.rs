//! Pasted image destinations

mod destination;

pub use destination::{
    forward_slashes, portable_path, validate_prefix, ImageDestination, DEFAULT_FILE_PREFIX,
    PNG_EXTENSION,
};
