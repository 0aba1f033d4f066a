//! Repository aggregate and TOC validation surface.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::doc::Doc;
use crate::lint::lint_toc_format;
use crate::toc::toc_by_docs_outline;

/// A documentation repository: an optional authored TOC outline plus the
/// docs it organizes.
///
/// Read-only to this layer except for the `toc` body, whose changes are
/// validated by [`Repository::validate`] and snapshotted by the version
/// tracking functions in [`crate::version`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Repository {
    /// Repository identifier.
    pub id: i64,
    /// Repository name (slug).
    pub name: String,
    /// Authored TOC outline body, if any. An empty or whitespace-only body
    /// counts as absent.
    pub toc: Option<String>,
    /// Docs belonging to this repository, in no particular order.
    pub docs: Vec<Doc>,
    /// User id of the most recent editor, recorded on version snapshots.
    pub last_editor_id: i64,
}

impl Repository {
    /// Whether an authored TOC body is present (non-empty after trimming).
    #[must_use]
    pub fn has_toc_body(&self) -> bool {
        self.toc.as_deref().is_some_and(|body| !body.trim().is_empty())
    }

    /// Content-version fingerprint over the authored TOC body and doc set.
    ///
    /// Any change to the outline, or to a doc's id, slug, or title, yields
    /// a different fingerprint. Used as the cache etag for every derived
    /// artifact, so stale entries stop matching instead of being served.
    #[must_use]
    pub fn cache_version(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.id.to_le_bytes());
        hasher.update(self.toc.as_deref().unwrap_or("").as_bytes());
        for doc in &self.docs {
            hasher.update(doc.id.to_le_bytes());
            hasher.update(doc.slug.as_bytes());
            hasher.update([0]);
            hasher.update(doc.title.as_bytes());
            hasher.update([0]);
        }
        hex::encode(hasher.finalize())
    }

    /// The effective outline text without consulting any cache.
    ///
    /// Authored body verbatim when present, else a synthesized flat listing
    /// of the docs in creation order. [`crate::RepositoryToc`] provides the
    /// cached equivalent for request paths.
    #[must_use]
    pub fn effective_toc_text(&self) -> String {
        match &self.toc {
            Some(body) if !body.trim().is_empty() => body.clone(),
            _ => toc_by_docs_outline(&self.docs),
        }
    }

    /// Validate the effective TOC outline, collecting errors against the
    /// `toc` field.
    ///
    /// Strict parsing is used here and only here: the same text may render
    /// fine on display paths while being rejected by validation.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] carrying one [`FieldError`] per problem;
    /// callers block persistence on any error.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if let Err(e) = lint_toc_format(&self.effective_toc_text()) {
            errors.add("toc", e.to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// A validation failure attached to a single field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// Field the error is collected against (e.g., `"toc"`).
    pub field: &'static str,
    /// User-facing message.
    pub message: String,
}

/// Collected validation failures for a repository write.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Failures in the order they were collected.
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Record a failure against a field.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// True when no failures were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed")?;
        for error in &self.errors {
            write!(f, "; {}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
