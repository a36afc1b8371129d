//! Temporary-artifact cleanup.
//!
//! Every temporary path created during a request (uploads, per-file outputs,
//! scratch directories) is registered here. Cleanup runs exactly once per
//! request, on every exit path; individual deletion failures are logged and
//! never fail the request.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Request-scoped ledger of temporary artifacts.
///
/// Append-only during processing. `cleanup_all` is idempotent; the `Drop`
/// impl fires it as a backstop so an early return cannot leak files.
#[derive(Debug, Default)]
pub struct ArtifactLedger {
    paths: Mutex<Vec<PathBuf>>,
    cleaned: AtomicBool,
}

impl ArtifactLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path to the cleanup ledger.
    pub fn register(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        tracing::trace!(path = %path.display(), "Registering temporary artifact");
        self.paths
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(path);
    }

    /// Number of registered artifacts (for tests and logging).
    pub fn len(&self) -> usize {
        self.paths
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delete every registered path, best-effort per entry. A failure to
    /// delete one entry never blocks deletion of the rest.
    pub fn cleanup_all(&self) {
        if self.cleaned.swap(true, Ordering::SeqCst) {
            return;
        }

        let paths = std::mem::take(
            &mut *self
                .paths
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        );

        for path in paths {
            remove_artifact(&path);
        }
    }
}

impl Drop for ArtifactLedger {
    fn drop(&mut self) {
        self.cleanup_all();
    }
}

fn remove_artifact(path: &Path) {
    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };

    match result {
        Ok(()) => tracing::trace!(path = %path.display(), "Deleted temporary artifact"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to delete temporary artifact"
            );
        }
    }
}
