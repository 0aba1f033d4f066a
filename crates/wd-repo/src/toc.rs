//! Per-request TOC view over a repository.
//!
//! [`RepositoryToc`] resolves the effective outline text, derives cached
//! artifacts from it, and memoizes the parsed tree and ordered doc list for
//! the duration of one request. It is deliberately cheap to construct and
//! not `Sync`: cross-request reuse goes through the [`Cache`], not through
//! this view.

use std::cell::OnceCell;

use wd_cache::{Cache, CacheBucket, CacheBucketExt};
use wd_toc::TocTree;

use crate::doc::Doc;
use crate::order;
use crate::repository::Repository;

/// Bucket holding rendered TOC HTML, keyed by repository id and prefix.
const BUCKET_TOC_HTML: &str = "toc_html";
/// Bucket holding the synthesized doc-listing outline, keyed by repository id.
const BUCKET_TOC_BY_DOCS: &str = "toc_by_docs_text";

/// Single-request view of a repository's table of contents.
///
/// All derived values are keyed by the repository's content-version
/// fingerprint, taken once at construction; a concurrent edit simply means
/// this view keeps serving the version it was built against.
pub struct RepositoryToc<'a> {
    repo: &'a Repository,
    version: String,
    html_bucket: Box<dyn CacheBucket>,
    text_bucket: Box<dyn CacheBucket>,
    tree: OnceCell<TocTree>,
    ordered: OnceCell<Vec<&'a Doc>>,
}

impl<'a> RepositoryToc<'a> {
    /// Create a view over `repo` backed by `cache`.
    #[must_use]
    pub fn new(repo: &'a Repository, cache: &dyn Cache) -> Self {
        Self {
            repo,
            version: repo.cache_version(),
            html_bucket: cache.bucket(BUCKET_TOC_HTML),
            text_bucket: cache.bucket(BUCKET_TOC_BY_DOCS),
            tree: OnceCell::new(),
            ordered: OnceCell::new(),
        }
    }

    /// The content-version fingerprint this view was built against.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The effective outline text: the authored body verbatim when present,
    /// else the synthesized doc listing.
    #[must_use]
    pub fn toc_text(&self) -> String {
        match &self.repo.toc {
            Some(body) if !body.trim().is_empty() => body.clone(),
            _ => self.toc_by_docs_text(),
        }
    }

    /// Synthesized flat outline listing every doc in creation (id) order.
    ///
    /// Cached per content version; synthesis is deterministic for a fixed
    /// doc set, so concurrent populates converge on the same text.
    #[must_use]
    pub fn toc_by_docs_text(&self) -> String {
        let key = self.repo.id.to_string();
        self.text_bucket.fetch_string(&key, &self.version, || {
            tracing::debug!(repo = self.repo.id, "Synthesizing doc-listing TOC");
            toc_by_docs_outline(&self.repo.docs)
        })
    }

    /// The parsed effective outline, lenient, memoized for this request.
    pub fn tree(&self) -> &TocTree {
        self.tree.get_or_init(|| TocTree::parse(&self.toc_text()))
    }

    /// Rendered TOC HTML, cached per content version and prefix.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Optional url prefix applied to relative urls
    #[must_use]
    pub fn toc_html(&self, prefix: Option<&str>) -> String {
        let key = match prefix {
            Some(p) => format!("{}:{p}", self.repo.id),
            None => self.repo.id.to_string(),
        };
        self.html_bucket
            .fetch_string(&key, &self.version, || self.tree().to_html(prefix))
    }

    /// JSON tree of the effective outline.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn toc_json(&self) -> serde_json::Result<String> {
        self.tree().to_json()
    }

    /// JSON tree of the synthesized doc listing, regardless of whether an
    /// authored outline exists.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn toc_by_docs_json(&self) -> serde_json::Result<String> {
        TocTree::parse(&self.toc_by_docs_text()).to_json()
    }

    /// Docs in the order the effective TOC declares them.
    ///
    /// Memoized for this request; see [`order::ordered_docs`] for the
    /// selection rules.
    pub fn ordered_docs(&self) -> &[&'a Doc] {
        self.ordered
            .get_or_init(|| order::ordered_docs(self.tree(), &self.repo.docs))
    }
}

/// Synthesize the flat outline for a doc set, ascending by id.
///
/// Each doc becomes a depth-0 entry `{ title, depth, id, url }`; the output
/// is itself a parseable outline, which is what guarantees every repository
/// has a well-defined TOC even with no authored body.
#[must_use]
pub fn toc_by_docs_outline(docs: &[Doc]) -> String {
    #[derive(serde::Serialize)]
    struct Line<'d> {
        title: &'d str,
        depth: usize,
        id: i64,
        url: &'d str,
    }

    let mut sorted: Vec<&Doc> = docs.iter().collect();
    sorted.sort_by_key(|d| d.id);

    let lines: Vec<Line<'_>> = sorted
        .iter()
        .map(|d| Line {
            title: &d.title,
            depth: 0,
            id: d.id,
            url: &d.slug,
        })
        .collect();

    match serde_yaml::to_string(&lines) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serialize doc listing");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use pretty_assertions::assert_eq;
    use wd_cache::MemoryCache;

    use super::*;

    fn doc(id: i64, slug: &str, title: &str) -> Doc {
        Doc {
            id,
            slug: slug.to_owned(),
            title: title.to_owned(),
        }
    }

    fn repo(toc: Option<&str>, docs: Vec<Doc>) -> Repository {
        Repository {
            id: 42,
            name: "handbook".to_owned(),
            toc: toc.map(str::to_owned),
            docs,
            last_editor_id: 7,
        }
    }

    /// Counts every populate so tests can observe recomputes.
    struct CountingCache {
        inner: MemoryCache,
        sets: Arc<AtomicU32>,
    }

    struct CountingBucket {
        inner: Box<dyn CacheBucket>,
        sets: Arc<AtomicU32>,
    }

    impl Cache for CountingCache {
        fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
            Box::new(CountingBucket {
                inner: self.inner.bucket(name),
                sets: Arc::clone(&self.sets),
            })
        }
    }

    impl CacheBucket for CountingBucket {
        fn get(&self, key: &str, etag: &str) -> Option<Vec<u8>> {
            self.inner.get(key, etag)
        }

        fn set(&self, key: &str, etag: &str, value: &[u8]) {
            self.sets.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, etag, value);
        }
    }

    #[test]
    fn test_toc_text_prefers_authored_body() {
        let body = "- title: Intro\n  url: intro\n";
        let repo = repo(Some(body), vec![doc(1, "other", "Other")]);
        let cache = MemoryCache::new();

        assert_eq!(RepositoryToc::new(&repo, &cache).toc_text(), body);
    }

    #[test]
    fn test_toc_text_falls_back_to_doc_listing() {
        let repo = repo(None, vec![doc(2, "setup", "Setup"), doc(1, "intro", "Intro")]);
        let cache = MemoryCache::new();
        let toc = RepositoryToc::new(&repo, &cache);

        let tree = TocTree::parse(&toc.toc_text());
        assert_eq!(tree.urls(), ["intro", "setup"]);
    }

    #[test]
    fn test_toc_by_docs_outline_orders_by_ascending_id() {
        let docs = vec![doc(3, "c", "C"), doc(1, "a", "A"), doc(2, "b", "B")];
        let text = toc_by_docs_outline(&docs);

        let tree = TocTree::parse(&text);
        assert_eq!(tree.urls(), ["a", "b", "c"]);
        assert!(tree.flatten().iter().all(|item| item.depth == 0));
    }

    #[test]
    fn test_toc_by_docs_outline_empty_doc_set() {
        let text = toc_by_docs_outline(&[]);
        assert!(TocTree::parse(&text).is_empty());
    }

    #[test]
    fn test_toc_html_renders_links() {
        let repo = repo(
            Some("- title: Intro\n  url: intro\n"),
            vec![doc(1, "intro", "Intro")],
        );
        let cache = MemoryCache::new();
        let toc = RepositoryToc::new(&repo, &cache);

        let html = toc.toc_html(Some("/handbook/docs"));
        assert!(html.contains(r#"<a href="/handbook/docs/intro">Intro</a>"#));
    }

    #[test]
    fn test_toc_html_cached_across_requests() {
        let repo = repo(Some("- title: Intro\n  url: intro\n"), Vec::new());
        let sets = Arc::new(AtomicU32::new(0));
        let cache = CountingCache {
            inner: MemoryCache::new(),
            sets: Arc::clone(&sets),
        };

        // Two separate request views share the cache.
        let first = RepositoryToc::new(&repo, &cache).toc_html(None);
        let second = RepositoryToc::new(&repo, &cache).toc_html(None);

        assert_eq!(first, second);
        assert_eq!(sets.load(Ordering::SeqCst), 1, "second view must hit the cache");
    }

    #[test]
    fn test_toc_html_distinct_prefixes_cached_separately() {
        let repo = repo(Some("- title: Intro\n  url: intro\n"), Vec::new());
        let cache = MemoryCache::new();
        let toc = RepositoryToc::new(&repo, &cache);

        let bare = toc.toc_html(None);
        let prefixed = toc.toc_html(Some("/docs"));

        assert_ne!(bare, prefixed);
        // Re-reading each gives back the matching variant, not the last write.
        assert_eq!(toc.toc_html(None), bare);
        assert_eq!(toc.toc_html(Some("/docs")), prefixed);
    }

    #[test]
    fn test_toc_html_recomputed_after_content_change() {
        let sets = Arc::new(AtomicU32::new(0));
        let cache = CountingCache {
            inner: MemoryCache::new(),
            sets: Arc::clone(&sets),
        };

        let before = repo(Some("- title: Old\n  url: old\n"), Vec::new());
        let old_html = RepositoryToc::new(&before, &cache).toc_html(None);

        let after = repo(Some("- title: New\n  url: new\n"), Vec::new());
        let new_html = RepositoryToc::new(&after, &cache).toc_html(None);

        assert_ne!(old_html, new_html);
        assert_eq!(sets.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_toc_json_round_trips_ordering() {
        let docs = vec![doc(1, "a", "A"), doc(2, "b", "B"), doc(3, "c", "C")];
        let body = "- title: C\n  url: c\n- title: A\n  url: a\n";
        let repo = repo(Some(body), docs);
        let cache = MemoryCache::new();
        let toc = RepositoryToc::new(&repo, &cache);

        // Ordering docs against the JSON rendition matches ordering against
        // the authored outline.
        let json = toc.toc_json().unwrap();
        let from_json = order::ordered_docs(&TocTree::parse(&json), &repo.docs);
        assert_eq!(from_json, toc.ordered_docs());
    }

    #[test]
    fn test_toc_by_docs_json_lists_all_docs() {
        let repo = repo(
            Some("- title: Partial\n  url: a\n"),
            vec![doc(1, "a", "A"), doc(2, "b", "B")],
        );
        let cache = MemoryCache::new();
        let toc = RepositoryToc::new(&repo, &cache);

        let json = toc.toc_by_docs_json().unwrap();
        let tree = TocTree::parse(&json);
        assert_eq!(tree.urls(), ["a", "b"]);
    }

    #[test]
    fn test_ordered_docs_scenario_c_a_excludes_b() {
        let docs = vec![doc(1, "a", "A"), doc(2, "b", "B"), doc(3, "c", "C")];
        let body = "- title: C\n  url: c\n- title: A\n  url: a\n";
        let repo = repo(Some(body), docs);
        let cache = MemoryCache::new();
        let toc = RepositoryToc::new(&repo, &cache);

        let slugs: Vec<&str> = toc.ordered_docs().iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, ["c", "a"]);
    }

    #[test]
    fn test_ordered_docs_memoized_within_request() {
        let repo = repo(
            Some("- title: A\n  url: a\n"),
            vec![doc(1, "a", "A")],
        );
        let cache = MemoryCache::new();
        let toc = RepositoryToc::new(&repo, &cache);

        let first = toc.ordered_docs().as_ptr();
        let second = toc.ordered_docs().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_authored_toc_still_renders() {
        // Display paths degrade to an empty tree rather than fail.
        let repo = repo(Some("- title: [unclosed"), vec![doc(1, "a", "A")]);
        let cache = MemoryCache::new();
        let toc = RepositoryToc::new(&repo, &cache);

        assert_eq!(toc.toc_html(None), r#"<ul class="toc"></ul>"#);
        assert!(toc.ordered_docs().is_empty());
    }
}
