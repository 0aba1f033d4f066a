//! Lenient and strict parsing of the YAML TOC outline.
//!
//! The outline is loaded generically through [`serde_yaml::Value`] first so
//! both modes share one traversal; strictness only changes what happens when
//! an entry cannot be resolved.

use serde_yaml::Value;

use crate::item::{TocItem, TocTree};

/// Error raised by [`TocTree::parse_strict`] when the outline text is not a
/// well-formed YAML outline.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The text is not syntactically valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The top-level YAML value is not a list of entries.
    #[error("expected a list of TOC entries, got {0}")]
    NotAList(&'static str),
    /// An entry resolves to an empty title and has no url to fall back on.
    #[error("entry {index} has no title or url")]
    UntitledEntry {
        /// Position of the entry within its containing list.
        index: usize,
    },
    /// A `children` value is not a list.
    #[error("children of entry {index} is not a list")]
    InvalidChildren {
        /// Position of the entry within its containing list.
        index: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Lenient,
    Strict,
}

impl TocTree {
    /// Parse an outline leniently.
    ///
    /// Never fails: malformed YAML yields an empty tree, entries that cannot
    /// be resolved are dropped, and the rest of the outline is kept. Used by
    /// every display path. Parsing is pure; the same text always yields a
    /// structurally equal tree.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match parse_with(text, Mode::Lenient) {
            Ok(tree) => tree,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed TOC outline, rendering empty tree");
                Self::default()
            }
        }
    }

    /// Parse an outline strictly, for validation.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] when the text is not valid YAML, is not a
    /// list of entries, or contains an entry with neither a usable title nor
    /// a url. Text that fails here may still lenient-parse for display.
    pub fn parse_strict(text: &str) -> Result<Self, FormatError> {
        parse_with(text, Mode::Strict)
    }
}

fn parse_with(text: &str, mode: Mode) -> Result<TocTree, FormatError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(TocTree::default());
    }

    let value: Value = serde_yaml::from_str(trimmed)?;
    let entries = match value {
        Value::Sequence(entries) => entries,
        Value::Null => return Ok(TocTree::default()),
        other => return Err(FormatError::NotAList(type_name(&other))),
    };

    let items = parse_entries(&entries, 0, mode)?;
    Ok(TocTree { items })
}

fn parse_entries(entries: &[Value], depth: usize, mode: Mode) -> Result<Vec<TocItem>, FormatError> {
    let mut items = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        if !matches!(entry, Value::Mapping(_)) {
            match mode {
                Mode::Strict => return Err(FormatError::UntitledEntry { index }),
                Mode::Lenient => {
                    tracing::warn!(index, "Dropping non-mapping TOC entry");
                    continue;
                }
            }
        }

        let url = scalar_string(entry.get("url"));

        // Title resolution: the title key when non-empty, else the url.
        let title = scalar_string(entry.get("title"))
            .filter(|t| !t.trim().is_empty())
            .or_else(|| url.clone().filter(|u| !u.trim().is_empty()));
        let Some(title) = title else {
            match mode {
                Mode::Strict => return Err(FormatError::UntitledEntry { index }),
                Mode::Lenient => {
                    tracing::warn!(index, "Dropping TOC entry without title or url");
                    continue;
                }
            }
        };

        // Children inherit depth + 1 regardless of source indentation.
        let children = match entry.get("children") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(nested)) => parse_entries(nested, depth + 1, mode)?,
            Some(_) => match mode {
                Mode::Strict => return Err(FormatError::InvalidChildren { index }),
                Mode::Lenient => {
                    tracing::warn!(index, "Ignoring non-list children of TOC entry");
                    Vec::new()
                }
            },
        };

        items.push(TocItem {
            title,
            url,
            depth,
            children,
        });
    }

    Ok(items)
}

/// Read a scalar value as a string; `123` is a valid title in YAML.
fn scalar_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
