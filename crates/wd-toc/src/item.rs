//! TOC item and tree model.
//!
//! A parsed outline is an ordered forest of [`TocItem`]s. Depth is assigned
//! structurally during parsing: children always carry `depth == parent.depth
//! + 1`, so source indentation cannot produce depth jumps.

use serde::{Deserialize, Serialize};

/// A single entry in a table of contents.
///
/// Entries with a `url` link to a doc by slug; entries without one are plain
/// section headers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocItem {
    /// Display title. Falls back to the url when the source entry has no
    /// usable title of its own.
    pub title: String,

    /// Doc slug this entry links to, if any. Stored as authored; consumers
    /// trim surrounding whitespace when resolving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Nesting depth. Top-level entries are depth 0.
    #[serde(default)]
    pub depth: usize,

    /// Nested entries, each at `depth + 1`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocItem>,
}

impl TocItem {
    /// The entry's url with surrounding whitespace trimmed, if non-empty.
    #[must_use]
    pub fn resolved_url(&self) -> Option<&str> {
        let url = self.url.as_deref()?.trim();
        if url.is_empty() { None } else { Some(url) }
    }
}

/// An ordered sequence of top-level [`TocItem`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TocTree {
    /// Top-level entries in document order.
    pub items: Vec<TocItem>,
}

impl TocTree {
    /// True when the tree has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pre-order traversal of every entry in the tree.
    ///
    /// This is the sequence consumed by doc ordering and url extraction:
    /// each entry appears before its children, siblings keep their source
    /// order.
    #[must_use]
    pub fn flatten(&self) -> Vec<&TocItem> {
        let mut out = Vec::new();
        for item in &self.items {
            flatten_into(item, &mut out);
        }
        out
    }

    /// Trimmed, non-empty urls of every entry, in pre-order.
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        self.flatten()
            .into_iter()
            .filter_map(|item| item.resolved_url().map(str::to_owned))
            .collect()
    }
}

fn flatten_into<'a>(item: &'a TocItem, out: &mut Vec<&'a TocItem>) {
    out.push(item);
    for child in &item.children {
        flatten_into(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, url: Option<&str>, depth: usize, children: Vec<TocItem>) -> TocItem {
        TocItem {
            title: title.to_owned(),
            url: url.map(str::to_owned),
            depth,
            children,
        }
    }

    #[test]
    fn test_flatten_is_pre_order() {
        let tree = TocTree {
            items: vec![
                item(
                    "Guides",
                    None,
                    0,
                    vec![
                        item("Setup", Some("guides/setup"), 1, Vec::new()),
                        item("Deploy", Some("guides/deploy"), 1, Vec::new()),
                    ],
                ),
                item("FAQ", Some("faq"), 0, Vec::new()),
            ],
        };

        let titles: Vec<&str> = tree.flatten().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Guides", "Setup", "Deploy", "FAQ"]);
    }

    #[test]
    fn test_urls_skips_entries_without_url() {
        let tree = TocTree {
            items: vec![
                item("Header", None, 0, vec![item("Page", Some("page"), 1, Vec::new())]),
                item("Blank", Some("   "), 0, Vec::new()),
            ],
        };

        assert_eq!(tree.urls(), ["page"]);
    }

    #[test]
    fn test_urls_trims_whitespace() {
        let tree = TocTree {
            items: vec![item("Page", Some("  intro \n"), 0, Vec::new())],
        };

        assert_eq!(tree.urls(), ["intro"]);
    }

    #[test]
    fn test_resolved_url_empty_after_trim_is_none() {
        let entry = item("X", Some(" \t"), 0, Vec::new());
        assert_eq!(entry.resolved_url(), None);
    }

    #[test]
    fn test_empty_tree() {
        let tree = TocTree::default();
        assert!(tree.is_empty());
        assert!(tree.flatten().is_empty());
        assert!(tree.urls().is_empty());
    }
}
