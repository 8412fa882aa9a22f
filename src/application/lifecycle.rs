//! Ephemeral file lifecycle
//!
//! Every pasted image is tracked with a pending deletion timer. Tracking the
//! same path again restarts its retention window; shutdown deletes whatever
//! is still tracked.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, warn};
use tokio::task::JoinHandle;

use crate::domain::retention::Duration;

use super::ports::FileRemover;

struct Entry {
    generation: u64,
    timer: JoinHandle<()>,
}

struct Registry {
    entries: Mutex<HashMap<PathBuf, Entry>>,
    next_generation: AtomicU64,
    remover: Arc<dyn FileRemover>,
}

impl Registry {
    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Timer callback: only the current generation may delete
    fn expire(&self, path: &Path, generation: u64) {
        {
            let mut entries = self.lock();
            match entries.get(path) {
                Some(entry) if entry.generation == generation => {
                    entries.remove(path);
                }
                _ => return,
            }
        }

        debug!("Retention elapsed for {}", path.display());
        self.delete(path);
    }

    fn delete(&self, path: &Path) -> bool {
        match self.remover.remove(path) {
            Ok(()) => {
                debug!("Deleted {}", path.display());
                true
            }
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                warn!("Failed to delete {}: {}", path.display(), e);
                false
            }
        }
    }
}

/// Registry of temporary files awaiting deletion.
///
/// Cloning yields a handle to the same registry.
#[derive(Clone)]
pub struct TempFileTracker {
    registry: Arc<Registry>,
}

impl TempFileTracker {
    /// Create an empty tracker deleting through `remover`
    pub fn new(remover: Arc<dyn FileRemover>) -> Self {
        Self {
            registry: Arc::new(Registry {
                entries: Mutex::new(HashMap::new()),
                next_generation: AtomicU64::new(0),
                remover,
            }),
        }
    }

    /// Schedule deletion of `path` after `retention`.
    ///
    /// A path already tracked has its old timer cancelled and replaced.
    /// Must be called from within a Tokio runtime.
    pub fn track(&self, path: impl Into<PathBuf>, retention: Duration) {
        let path = path.into();
        let generation = self.registry.next_generation.fetch_add(1, Ordering::Relaxed);

        let mut entries = self.registry.lock();

        let registry = Arc::clone(&self.registry);
        let key = path.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(retention.as_std()).await;
            registry.expire(&key, generation);
        });

        if let Some(previous) = entries.insert(path.clone(), Entry { generation, timer }) {
            previous.timer.abort();
            debug!("Restarted retention for {} ({})", path.display(), retention);
        } else {
            debug!("Tracking {} for {}", path.display(), retention);
        }
    }

    /// Cancel every pending timer and delete every tracked file now.
    ///
    /// Runs synchronously. Entries are discarded whether or not deletion
    /// succeeds.
    ///
    /// # Returns
    /// Number of entries drained
    pub fn cancel_all(&self) -> usize {
        let drained: Vec<(PathBuf, Entry)> = self.registry.lock().drain().collect();
        let count = drained.len();

        for (path, entry) in drained {
            entry.timer.abort();
            self.registry.delete(&path);
        }

        if count > 0 {
            debug!("Cleaned up {} tracked file(s)", count);
        }
        count
    }

    /// Number of files currently awaiting deletion
    pub fn tracked_count(&self) -> usize {
        self.registry.lock().len()
    }

    /// Whether `path` currently has a pending timer
    pub fn is_tracked(&self, path: &Path) -> bool {
        self.registry.lock().contains_key(path)
    }
}
