//! Strict TOC format validation.
//!
//! Display paths lenient-parse and never fail; validation strict-parses and
//! surfaces one of two fixed user-facing messages. The asymmetry is
//! deliberate: a draft that is momentarily broken must still render, but it
//! must not be persisted.

use wd_toc::{FormatError, TocTree};

/// Validation failure for an authored TOC outline.
#[derive(Debug, thiserror::Error)]
pub enum TocLintError {
    /// The outline failed strict parsing.
    #[error("Invalid TOC format (required YAML format).")]
    InvalidFormat(#[source] FormatError),
    /// Any other failure while exercising the parsed outline.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Strict-parse an outline and exercise its renderers, mapping failures to
/// the fixed validation messages.
///
/// # Errors
///
/// [`TocLintError::InvalidFormat`] when strict parsing rejects the text;
/// [`TocLintError::Parse`] for any other failure, with the cause included.
pub fn lint_toc_format(text: &str) -> Result<(), TocLintError> {
    let tree = TocTree::parse_strict(text).map_err(TocLintError::InvalidFormat)?;

    // The HTML render is infallible; the JSON render covers the residual
    // failure path the generic message exists for.
    let _ = tree.to_html(None);
    tree.to_json()
        .map_err(|e| TocLintError::Parse(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_accepts_valid_outline() {
        let text = "\
- title: Introduction
  url: intro
- title: Guides
  children:
    - title: Setup
      url: guides/setup
";
        assert!(lint_toc_format(text).is_ok());
    }

    #[test]
    fn test_lint_accepts_empty_text() {
        assert!(lint_toc_format("").is_ok());
    }

    #[test]
    fn test_lint_rejects_invalid_yaml_with_fixed_message() {
        let err = lint_toc_format("- title: [unclosed").unwrap_err();
        assert_eq!(err.to_string(), "Invalid TOC format (required YAML format).");
    }

    #[test]
    fn test_lint_rejects_untitled_entry() {
        let err = lint_toc_format("- title:\n").unwrap_err();
        assert!(matches!(err, TocLintError::InvalidFormat(_)));
    }

    #[test]
    fn test_lint_strict_while_display_stays_lenient() {
        // The same text is rejected here but still lenient-parses for display.
        let text = "- title:\n";
        assert!(lint_toc_format(text).is_err());
        assert!(TocTree::parse(text).is_empty());
    }
}
