//! HTML rendering of a parsed TOC tree.
//!
//! Produces a nested list mirroring the tree shape. Entries with a url
//! become hyperlinks; bare entries become section headers.

use std::fmt::Write;

use crate::item::{TocItem, TocTree};

impl TocTree {
    /// Render the tree as a nested HTML list.
    ///
    /// When `prefix` is supplied it is prepended to every relative url.
    /// Urls with a scheme or a leading slash pass through unchanged.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Optional url prefix (e.g., `"/org/repo/docs"`)
    #[must_use]
    pub fn to_html(&self, prefix: Option<&str>) -> String {
        let mut out = String::from(r#"<ul class="toc">"#);
        for item in &self.items {
            render_item(item, prefix, &mut out);
        }
        out.push_str("</ul>");
        out
    }
}

fn render_item(item: &TocItem, prefix: Option<&str>, out: &mut String) {
    out.push_str("<li>");

    match item.resolved_url() {
        Some(url) => {
            let href = apply_prefix(url, prefix);
            write!(
                out,
                r#"<a href="{}">{}</a>"#,
                escape_html(&href),
                escape_html(&item.title)
            )
            .unwrap();
        }
        None => {
            write!(
                out,
                r#"<span class="toc-heading">{}</span>"#,
                escape_html(&item.title)
            )
            .unwrap();
        }
    }

    if !item.children.is_empty() {
        out.push_str("<ul>");
        for child in &item.children {
            render_item(child, prefix, out);
        }
        out.push_str("</ul>");
    }

    out.push_str("</li>");
}

/// Prepend `prefix` to a relative url, joined with a single slash.
fn apply_prefix(url: &str, prefix: Option<&str>) -> String {
    let Some(prefix) = prefix.filter(|p| !p.is_empty()) else {
        return url.to_owned();
    };
    if is_absolute(url) {
        return url.to_owned();
    }
    format!("{}/{url}", prefix.trim_end_matches('/'))
}

/// Urls that already name their destination and must not be prefixed.
fn is_absolute(url: &str) -> bool {
    url.starts_with('/')
        || url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with("//")
        || url.starts_with("mailto:")
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
