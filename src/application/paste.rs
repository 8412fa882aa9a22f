//! Paste clipboard image use case

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};
use thiserror::Error;

use crate::domain::environment::{detect_current, EnvironmentContext};
use crate::domain::error::DestinationError;
use crate::domain::image::ImageDestination;
use crate::domain::retention::Duration;

use super::acquisition::AcquireError;
use super::dispatcher::AcquisitionDispatcher;
use super::lifecycle::TempFileTracker;

/// Errors from the paste use case
#[derive(Debug, Error)]
pub enum PasteError {
    #[error("Cannot create output directory {path}: {message}")]
    Directory { path: String, message: String },

    #[error("Invalid destination: {0}")]
    Destination(#[from] DestinationError),

    #[error(transparent)]
    Acquire(#[from] AcquireError),
}

impl PasteError {
    /// Whether the clipboard simply held no image
    pub fn is_no_image(&self) -> bool {
        matches!(self, Self::Acquire(AcquireError::NoImage))
    }
}

/// Input parameters for the paste use case
#[derive(Debug, Clone)]
pub struct PasteInput {
    /// Directory the image is written into
    pub output_dir: PathBuf,
    /// File name prefix
    pub file_prefix: String,
    /// How long the file lives before deletion
    pub retention: Duration,
}

/// Output from the paste use case
#[derive(Debug, Clone)]
pub struct PasteOutput {
    /// Path of the written image
    pub path: PathBuf,
    /// Environment the image was acquired in
    pub context: EnvironmentContext,
    /// Retention the file was tracked with
    pub retention: Duration,
}

/// Acquires a clipboard image and tracks it for deferred deletion
pub struct PasteImageUseCase {
    dispatcher: Arc<AcquisitionDispatcher>,
    tracker: TempFileTracker,
}

impl PasteImageUseCase {
    /// Create a new use case instance
    pub fn new(dispatcher: Arc<AcquisitionDispatcher>, tracker: TempFileTracker) -> Self {
        Self {
            dispatcher,
            tracker,
        }
    }

    /// Tracker holding the files this use case produced
    pub fn tracker(&self) -> &TempFileTracker {
        &self.tracker
    }

    /// Paste into a freshly named file in the detected environment
    pub async fn execute(&self, input: PasteInput) -> Result<PasteOutput, PasteError> {
        self.execute_in(detect_current(), input).await
    }

    /// Paste into a freshly named file for an explicit environment
    pub async fn execute_in(
        &self,
        context: EnvironmentContext,
        input: PasteInput,
    ) -> Result<PasteOutput, PasteError> {
        create_dir(&input.output_dir).await?;

        let destination = ImageDestination::generate(&input.output_dir, &input.file_prefix)?;
        self.acquire_reserved(context, &destination, input.retention)
            .await?;

        Ok(PasteOutput {
            path: destination.into_path(),
            context,
            retention: input.retention,
        })
    }

    /// Acquire into `destination` and track it on success.
    ///
    /// An existing file at `destination` is left alone and reported as
    /// [`DestinationError::Exists`].
    pub async fn paste_to(
        &self,
        context: EnvironmentContext,
        destination: &Path,
        retention: Duration,
    ) -> Result<(), PasteError> {
        let destination = ImageDestination::new(destination)?;
        create_dir(destination.parent()).await?;
        destination.reserve()?;

        self.acquire_reserved(context, &destination, retention).await
    }

    /// Fill a reserved destination. Until the file is tracked it is removed
    /// on failure and when this future is dropped.
    async fn acquire_reserved(
        &self,
        context: EnvironmentContext,
        destination: &ImageDestination,
        retention: Duration,
    ) -> Result<(), PasteError> {
        let pending = PendingImage::new(destination.path());

        self.dispatcher.acquire(context, destination.path()).await?;
        self.tracker.track(destination.path(), retention);
        pending.keep();

        info!(
            "Saved clipboard image to {} (deleted after {})",
            destination, retention
        );
        Ok(())
    }

    /// Paste the clipboard image to `destination`.
    ///
    /// `retention` defaults to 600 seconds. Failures of any kind are
    /// reported as `false`.
    pub async fn paste_clipboard_image(&self, destination: &Path, retention: Option<Duration>) -> bool {
        let retention = retention.unwrap_or_default();
        match self.paste_to(detect_current(), destination, retention).await {
            Ok(()) => true,
            Err(e) => {
                info!("Paste failed: {}", e);
                false
            }
        }
    }
}

/// Removes a reserved destination unless it was handed to the tracker
struct PendingImage<'a> {
    path: Option<&'a Path>,
}

impl<'a> PendingImage<'a> {
    fn new(path: &'a Path) -> Self {
        Self { path: Some(path) }
    }

    fn keep(mut self) {
        self.path = None;
    }
}

impl Drop for PendingImage<'_> {
    fn drop(&mut self) {
        let Some(path) = self.path else {
            return;
        };
        match std::fs::remove_file(path) {
            Ok(()) => debug!("Removed unfinished image {}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove unfinished image {}: {}", path.display(), e),
        }
    }
}

async fn create_dir(dir: &Path) -> Result<(), PasteError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| PasteError::Directory {
            path: dir.display().to_string(),
            message: e.to_string(),
        })
}
