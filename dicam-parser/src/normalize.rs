//! Body normalization.
//!
//! Normalization runs before tokenization and guarantees that splitting the body
//! on the double-space separator reconstructs annotation tokens cleanly,
//! regardless of how the source file was line-wrapped:
//!
//!     1. Footnote lines (first non-space character `#`) are removed entirely.
//!     2. Spaces immediately before a markup opener (`<` or `{`) are deleted, so
//!        `word  {note}` and `word{note}` tokenize identically.
//!     3. A line break followed by further content is a soft break and is rejoined
//!        with the double-space separator. A line break not followed by content is
//!        a paragraph break; it survives as a `\n` attached to the preceding word
//!        and later forces a new display line in the wrapper.

use once_cell::sync::Lazy;
use regex::Regex;

static SPACE_BEFORE_MARKUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" +([<{])").expect("valid regex"));

static SOFT_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n([^\n])").expect("valid regex"));

/// Marker prefix for footnote lines, which are stripped before tokenization.
pub const FOOTNOTE_MARKER: char = '#';

/// Normalize a raw body block into double-space separated annotation tokens.
pub fn normalize(body: &str) -> String {
    let without_footnotes: Vec<&str> = body
        .trim_end()
        .lines()
        .filter(|line| !line.trim_start().starts_with(FOOTNOTE_MARKER))
        .collect();
    let body = without_footnotes.join("\n");

    let body = SPACE_BEFORE_MARKUP.replace_all(&body, "$1");
    SOFT_BREAK.replace_all(&body, "  $1").into_owned()
}
