//! Table-of-contents engine for WD.
//!
//! Wiki repositories describe their navigation with a YAML outline: a list
//! of entries, each a mapping with a `title` and an optional `url` (a doc
//! slug), nested via a `children` key. This crate turns that outline into a
//! [`TocTree`] and renders it as HTML or JSON.
//!
//! Parsing comes in two flavors:
//! - [`TocTree::parse`] is lenient: display paths must stay available even
//!   while an author's draft is momentarily broken, so malformed input
//!   degrades to a partial or empty tree and never fails.
//! - [`TocTree::parse_strict`] rejects malformed outlines with a
//!   [`FormatError`]; it backs form validation, not rendering.
//!
//! # Example
//!
//! ```
//! use wd_toc::TocTree;
//!
//! let outline = "\
//! - title: Introduction
//!   url: intro
//! - title: Guides
//!   children:
//!     - title: Setup
//!       url: guides/setup
//! ";
//! let tree = TocTree::parse(outline);
//! assert_eq!(tree.urls(), ["intro", "guides/setup"]);
//!
//! let html = tree.to_html(Some("/wiki/docs"));
//! assert!(html.contains(r#"<a href="/wiki/docs/intro">Introduction</a>"#));
//! ```

mod html;
mod item;
mod json;
mod parser;

pub use html::escape_html;
pub use item::{TocItem, TocTree};
pub use parser::FormatError;
