//! Bounded decode memoization.
//!
//! Keyed by a weak fingerprint (source path + declared size), never by
//! content hash: cheap, best-effort, and never a correctness dependency.
//! Misses are always safe; the bound is structural (LRU eviction), not an
//! incidental size check.

use image::DynamicImage;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Weak fingerprint of a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    path: PathBuf,
    size: u64,
}

impl Fingerprint {
    pub fn new(path: &Path, size: u64) -> Self {
        Self {
            path: path.to_path_buf(),
            size,
        }
    }
}

/// Process-wide memoization of decoded (and orientation-normalized) images.
///
/// The only cross-request shared mutable state in the pipeline.
pub struct DecodeCache {
    inner: Mutex<LruCache<Fingerprint, Arc<DynamicImage>>>,
}

impl DecodeCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity is at least 1");
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, key: &Fingerprint) -> Option<Arc<DynamicImage>> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    pub fn put(&self, key: Fingerprint, image: Arc<DynamicImage>) {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .put(key, image);
    }

    /// Look up the decoded image, or decode via `decode` and remember it.
    pub fn get_or_decode<F>(&self, key: Fingerprint, decode: F) -> anyhow::Result<Arc<DynamicImage>>
    where
        F: FnOnce() -> anyhow::Result<DynamicImage>,
    {
        if let Some(hit) = self.get(&key) {
            tracing::trace!(path = %key.path.display(), "Decode cache hit");
            return Ok(hit);
        }

        let image = Arc::new(decode()?);
        self.put(key, image.clone());
        Ok(image)
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
