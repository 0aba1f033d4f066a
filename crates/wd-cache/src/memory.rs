//! In-process cache implementation.
//!
//! [`MemoryCache`] keeps every entry in a shared map behind an `RwLock`.
//! Artifact values here are tiny (an outline or a rendered list per
//! repository version), so there is no eviction; a changed fingerprint
//! simply overwrites the previous entry on the next populate.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{Cache, CacheBucket};

/// (bucket name, entry key) pair addressing a single cache entry.
type EntryKey = (String, String);

struct Entry {
    etag: String,
    data: Vec<u8>,
}

/// In-process [`Cache`] backed by a shared map.
///
/// Buckets returned by [`Cache::bucket`] are cheap handles onto the same
/// underlying storage, so repeated `bucket("toc_html")` calls observe each
/// other's writes. Cloning the cache clones the handle, not the data.
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<EntryKey, Entry>>>,
}

impl MemoryCache {
    /// Create a new empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemoryCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        Box::new(MemoryCacheBucket {
            name: name.to_owned(),
            entries: Arc::clone(&self.entries),
        })
    }
}

/// A handle onto one named partition of a [`MemoryCache`].
struct MemoryCacheBucket {
    name: String,
    entries: Arc<RwLock<HashMap<EntryKey, Entry>>>,
}

impl CacheBucket for MemoryCacheBucket {
    fn get(&self, key: &str, etag: &str) -> Option<Vec<u8>> {
        // A poisoned lock means a writer panicked mid-insert; treat the
        // whole cache as cold rather than propagate.
        let entries = self.entries.read().ok()?;
        let entry = entries.get(&(self.name.clone(), key.to_owned()))?;

        if !etag.is_empty() && entry.etag != etag {
            tracing::debug!(bucket = %self.name, key, "Cache etag mismatch");
            return None;
        }

        Some(entry.data.clone())
    }

    fn set(&self, key: &str, etag: &str, value: &[u8]) {
        let Ok(mut entries) = self.entries.write() else {
            return;
        };
        entries.insert(
            (self.name.clone(), key.to_owned()),
            Entry {
                etag: etag.to_owned(),
                data: value.to_vec(),
            },
        );
    }
}
