//! Extension trait for [`CacheBucket`] with typed convenience methods.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::CacheBucket;

/// Typed convenience methods for [`CacheBucket`].
///
/// Provides string and JSON accessors plus the fetch-or-compute helpers the
/// TOC layer is written against. Implemented as default methods on an
/// extension trait so that:
///
/// - [`CacheBucket`] stays object-safe with no serde dependency
/// - Implementors only handle raw bytes
/// - Callers get ergonomic typed access via a blanket impl
///
/// # Example
///
/// ```
/// use wd_cache::{Cache, CacheBucketExt, MemoryCache};
///
/// let cache = MemoryCache::new();
/// let bucket = cache.bucket("toc_by_docs_text");
///
/// let text = bucket.fetch_string("42", "v1", || "- title: Intro\n".to_owned());
/// assert_eq!(bucket.fetch_string("42", "v1", || unreachable!()), text);
/// ```
pub trait CacheBucketExt: CacheBucket {
    /// Retrieve a cached UTF-8 string.
    ///
    /// Returns `None` on miss, etag mismatch, or invalid UTF-8.
    fn get_string(&self, key: &str, etag: &str) -> Option<String> {
        let bytes = self.get(key, etag)?;
        String::from_utf8(bytes).ok()
    }

    /// Store a string value.
    fn set_string(&self, key: &str, etag: &str, value: &str) {
        self.set(key, etag, value.as_bytes());
    }

    /// Retrieve a JSON-deserialized value.
    ///
    /// Returns `None` on miss, etag mismatch, or deserialization failure.
    fn get_json<T: DeserializeOwned>(&self, key: &str, etag: &str) -> Option<T> {
        let bytes = self.get(key, etag)?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Store a value as JSON. Silently does nothing if serialization fails.
    fn set_json<T: Serialize>(&self, key: &str, etag: &str, value: &T) {
        if let Ok(bytes) = serde_json::to_vec(value) {
            self.set(key, etag, &bytes);
        }
    }

    /// Return the cached string for `key`/`etag`, or compute, store, and
    /// return it.
    ///
    /// `compute` must be pure given the key and etag; it is only invoked on
    /// a miss. Concurrent callers may both compute — last write wins.
    fn fetch_string(&self, key: &str, etag: &str, compute: impl FnOnce() -> String) -> String {
        if let Some(value) = self.get_string(key, etag) {
            return value;
        }
        let value = compute();
        self.set_string(key, etag, &value);
        value
    }

    /// Return the cached JSON value for `key`/`etag`, or compute, store, and
    /// return it.
    ///
    /// Same contract as [`CacheBucketExt::fetch_string`].
    fn fetch_json<T: Serialize + DeserializeOwned>(
        &self,
        key: &str,
        etag: &str,
        compute: impl FnOnce() -> T,
    ) -> T {
        if let Some(value) = self.get_json(key, etag) {
            return value;
        }
        let value = compute();
        self.set_json(key, etag, &value);
        value
    }
}

impl<B: CacheBucket + ?Sized> CacheBucketExt for B {}
