//! TOC-ordered doc selection.

use std::collections::HashMap;

use wd_toc::TocTree;

use crate::doc::Doc;

/// Select the docs a TOC tree references, in the tree's pre-order.
///
/// Walks the tree's trimmed url sequence, emitting the doc whose slug
/// matches each url. Urls with no matching doc are skipped; docs never
/// referenced by the tree are excluded. No doc appears twice even when the
/// tree references a slug more than once, so the result is always a
/// subsequence of `docs`. Callers needing "all docs" union this with the
/// unordered set themselves.
#[must_use]
pub fn ordered_docs<'a>(tree: &TocTree, docs: &'a [Doc]) -> Vec<&'a Doc> {
    let mut by_slug: HashMap<&str, &Doc> = docs.iter().map(|d| (d.slug.as_str(), d)).collect();

    // remove() keeps a repeated slug from emitting the same doc twice.
    tree.urls()
        .iter()
        .filter_map(|url| by_slug.remove(url.as_str()))
        .collect()
}
