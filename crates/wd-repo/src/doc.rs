//! Doc read model.

use serde::{Deserialize, Serialize};

/// A document within a repository collection.
///
/// Read-only to this layer: docs are owned and persisted elsewhere. The
/// `slug` is unique within a repository and is what TOC urls refer to. `id`
/// is an opaque ordering key — ascending id is creation order, and nothing
/// more is assumed of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doc {
    /// Creation-ordered identifier.
    pub id: i64,
    /// Url slug, unique within the repository.
    pub slug: String,
    /// Display title.
    pub title: String,
}
