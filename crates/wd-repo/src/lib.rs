//! Repository collection layer for WD.
//!
//! A [`Repository`] owns an optional authored TOC outline and a set of
//! [`Doc`]s. This crate resolves the *effective* outline (authored body, or
//! a synthesized flat listing of the docs in creation order), derives cached
//! artifacts from it, orders docs to match it, validates it, and snapshots
//! it into [`TocVersion`] records when it changes.
//!
//! Derived artifacts flow through a [`wd_cache::Cache`] keyed by the
//! repository's content-version fingerprint; per-request memoization lives
//! in [`RepositoryToc`], a cheap view constructed once per request.
//!
//! # Example
//!
//! ```
//! use wd_cache::MemoryCache;
//! use wd_repo::{Doc, Repository, RepositoryToc};
//!
//! let repo = Repository {
//!     id: 1,
//!     name: "handbook".to_owned(),
//!     toc: None,
//!     docs: vec![
//!         Doc { id: 2, slug: "setup".to_owned(), title: "Setup".to_owned() },
//!         Doc { id: 1, slug: "intro".to_owned(), title: "Intro".to_owned() },
//!     ],
//!     last_editor_id: 7,
//! };
//!
//! let cache = MemoryCache::new();
//! let toc = RepositoryToc::new(&repo, &cache);
//!
//! // No authored outline: docs are listed in creation (id) order.
//! let slugs: Vec<&str> = toc.ordered_docs().iter().map(|d| d.slug.as_str()).collect();
//! assert_eq!(slugs, ["intro", "setup"]);
//! ```

mod doc;
mod lint;
mod order;
mod repository;
mod toc;
mod version;

pub use doc::Doc;
pub use lint::{TocLintError, lint_toc_format};
pub use order::ordered_docs;
pub use repository::{FieldError, Repository, ValidationErrors};
pub use toc::{RepositoryToc, toc_by_docs_outline};
pub use version::{
    MemoryVersionStore, SubjectKind, SubjectRef, TocVersion, TocVersionStore, VersionError,
    track_toc_on_create, track_toc_on_update,
};
