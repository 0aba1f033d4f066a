//! Cache abstraction for derived TOC artifacts in WD.
//!
//! Rendering a repository's table of contents is pure but not free, so the
//! derived artifacts (effective outline text, HTML) are memoized behind the
//! traits in this crate:
//!
//! - [`Cache`]: factory for named artifact buckets (e.g., `"toc_html"`)
//! - [`CacheBucket`]: key-value store with etag-based invalidation
//!
//! The etag is the owning repository's content-version fingerprint: any edit
//! to the authored outline or the doc set changes the fingerprint, so a
//! stale entry can never be served — it simply stops matching.
//!
//! Concurrent requests may race to populate the same key. That is tolerated:
//! compute functions are pure given the key and etag, so the duplicate work
//! is wasted effort rather than a correctness hazard, and the last writer
//! wins.
//!
//! # Implementations
//!
//! - [`NullCache`] / [`NullCacheBucket`]: no-op (always miss, caching off)
//! - [`MemoryCache`]: in-process store for servers and tests
//!
//! # Example
//!
//! ```
//! use wd_cache::{Cache, CacheBucketExt, MemoryCache};
//!
//! let cache = MemoryCache::new();
//! let bucket = cache.bucket("toc_html");
//!
//! let html = bucket.fetch_string("42", "fingerprint-a", || "<ul></ul>".to_owned());
//! assert_eq!(html, "<ul></ul>");
//!
//! // Same key, new fingerprint: the old entry no longer matches.
//! assert_eq!(bucket.get("42", "fingerprint-b"), None);
//! ```

mod ext;
mod memory;

pub use ext::CacheBucketExt;
pub use memory::MemoryCache;

/// A named artifact partition within a [`Cache`].
///
/// Each bucket stores key-value pairs invalidated by an etag. A hit occurs
/// only when both the key and the etag match; an entry stored under an old
/// etag is treated as absent.
pub trait CacheBucket: Send + Sync {
    /// Retrieve a cached value.
    ///
    /// Returns `Some(value)` if the key exists **and** was stored with the
    /// same `etag`; `None` on miss or etag mismatch. An empty `etag` skips
    /// validation and returns whatever is stored.
    ///
    /// # Arguments
    ///
    /// * `key` - Cache key (e.g., a repository id, optionally suffixed)
    /// * `etag` - Content-version fingerprint the value must match
    fn get(&self, key: &str, etag: &str) -> Option<Vec<u8>>;

    /// Store a value, overwriting any existing entry for the key regardless
    /// of its previous etag.
    ///
    /// Storage failures are swallowed by implementations: the cache is an
    /// optimization and a failed write only costs a recompute.
    fn set(&self, key: &str, etag: &str, value: &[u8]);
}

/// Factory for named cache [`CacheBucket`]s.
///
/// Buckets are logically isolated from each other; the same key in two
/// buckets names two independent entries.
pub trait Cache: Send + Sync {
    /// Open or create a named bucket.
    ///
    /// Multiple calls with the same name may return independent handles
    /// sharing the same underlying storage.
    ///
    /// # Arguments
    ///
    /// * `name` - Bucket name (e.g., "toc_html", "toc_by_docs_text")
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket>;
}

/// No-op [`CacheBucket`] that never stores or retrieves data.
pub struct NullCacheBucket;

impl CacheBucket for NullCacheBucket {
    fn get(&self, _key: &str, _etag: &str) -> Option<Vec<u8>> {
        None
    }

    fn set(&self, _key: &str, _etag: &str, _value: &[u8]) {}
}

/// No-op [`Cache`] that always returns [`NullCacheBucket`]s.
///
/// Use when caching is disabled; every artifact is recomputed on demand.
pub struct NullCache;

impl Cache for NullCache {
    fn bucket(&self, _name: &str) -> Box<dyn CacheBucket> {
        Box::new(NullCacheBucket)
    }
}
