//! JSON rendering of a parsed TOC tree.

use crate::item::TocTree;

impl TocTree {
    /// Render the full tree (title, url, depth, children) as a JSON string.
    ///
    /// The output is lossless: deserializing it yields a structurally equal
    /// tree, and its pre-order title/url sequence matches [`TocTree::urls`].
    /// JSON is a YAML subset, so the output is even accepted by
    /// [`TocTree::parse`].
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.items)
    }
}
