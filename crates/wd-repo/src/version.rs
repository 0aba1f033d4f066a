//! TOC version snapshots.
//!
//! Every change to an authored TOC body is captured as an immutable
//! [`TocVersion`] record: created on repository creation when a body is
//! present, and on update when the body actually changed. Snapshots attach
//! to their owner through a tagged [`SubjectRef`] so other entities can
//! carry version history through the same store.

use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::repository::Repository;

/// Kind of entity a version snapshot belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SubjectKind {
    /// A repository's authored TOC body.
    Repository,
    /// A doc's content body.
    Doc,
}

/// Tagged reference to the entity owning a version snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectRef {
    /// Owner kind.
    pub kind: SubjectKind,
    /// Owner id within its kind.
    pub id: i64,
}

impl SubjectRef {
    /// Reference a repository.
    #[must_use]
    pub fn repository(id: i64) -> Self {
        Self {
            kind: SubjectKind::Repository,
            id,
        }
    }

    /// Reference a doc.
    #[must_use]
    pub fn doc(id: i64) -> Self {
        Self {
            kind: SubjectKind::Doc,
            id,
        }
    }
}

/// An immutable snapshot of a subject's body at some point in time.
///
/// Created by the tracking functions below, never mutated or deleted here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocVersion {
    /// Snapshot id, ascending over time within a store.
    pub id: i64,
    /// Owning entity.
    pub subject: SubjectRef,
    /// User who authored the change (the repository's last editor).
    pub user_id: i64,
    /// The body as it stood when the snapshot was taken.
    pub body: String,
    /// Creation time, seconds since the Unix epoch.
    pub created_at: u64,
}

/// Error from a version store operation.
///
/// Store failures indicate a persistence-layer fault and are never masked;
/// they propagate to the caller as fatal for the request.
#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    /// The backing store rejected or failed the operation.
    #[error("version store failure: {0}")]
    Store(String),
}

/// Append-only store for [`TocVersion`] snapshots.
pub trait TocVersionStore: Send + Sync {
    /// Record a new snapshot for `subject`.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError`] when the backing store fails.
    fn create(
        &self,
        subject: SubjectRef,
        user_id: i64,
        body: &str,
    ) -> Result<TocVersion, VersionError>;

    /// Snapshots for `subject`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError`] when the backing store fails.
    fn for_subject(&self, subject: SubjectRef) -> Result<Vec<TocVersion>, VersionError>;
}

/// In-process [`TocVersionStore`] for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemoryVersionStore {
    versions: RwLock<Vec<TocVersion>>,
    next_id: AtomicI64,
}

impl MemoryVersionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TocVersionStore for MemoryVersionStore {
    fn create(
        &self,
        subject: SubjectRef,
        user_id: i64,
        body: &str,
    ) -> Result<TocVersion, VersionError> {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());

        let version = TocVersion {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            subject,
            user_id,
            body: body.to_owned(),
            created_at,
        };

        let mut versions = self
            .versions
            .write()
            .map_err(|_| VersionError::Store("store lock poisoned".to_owned()))?;
        versions.push(version.clone());
        Ok(version)
    }

    fn for_subject(&self, subject: SubjectRef) -> Result<Vec<TocVersion>, VersionError> {
        let versions = self
            .versions
            .read()
            .map_err(|_| VersionError::Store("store lock poisoned".to_owned()))?;

        let mut matched: Vec<TocVersion> = versions
            .iter()
            .filter(|v| v.subject == subject)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(matched)
    }
}

/// Snapshot the authored TOC body of a freshly created repository.
///
/// Records nothing when the repository has no authored body.
///
/// # Errors
///
/// Propagates [`VersionError`] from the store.
pub fn track_toc_on_create(
    repo: &Repository,
    store: &dyn TocVersionStore,
) -> Result<Option<TocVersion>, VersionError> {
    let Some(body) = repo.toc.as_deref().filter(|b| !b.trim().is_empty()) else {
        return Ok(None);
    };

    store
        .create(SubjectRef::repository(repo.id), repo.last_editor_id, body)
        .map(Some)
}

/// Snapshot the authored TOC body after an update, if it changed.
///
/// `previous_toc` is the body as previously persisted. Nothing is recorded
/// when the body is unchanged, or when it "becomes" empty having never been
/// set. Clearing a previously authored body is a change and records a
/// snapshot with the empty body.
///
/// # Errors
///
/// Propagates [`VersionError`] from the store.
pub fn track_toc_on_update(
    repo: &Repository,
    previous_toc: Option<&str>,
    store: &dyn TocVersionStore,
) -> Result<Option<TocVersion>, VersionError> {
    let current = repo.toc.as_deref().unwrap_or("");
    let previous = previous_toc.unwrap_or("");

    if current == previous {
        return Ok(None);
    }

    store
        .create(
            SubjectRef::repository(repo.id),
            repo.last_editor_id,
            current,
        )
        .map(Some)
}
