//! LineSet extraction
//!
//! Splits a source's full text into an ordered [`LineSequence`]. The order is
//! kept only so views can be rendered stably; membership tests downstream
//! ignore it.

use crate::model::Source;

/// Ordered lines of one source, in original position order
pub type LineSequence = Vec<String>;

/// The line terminator recognised by extraction
pub const TERMINATOR: char = '\n';

/// Split text on `\n` boundaries.
///
/// A trailing terminator yields a trailing empty element and empty text
/// yields a single empty element, so `extract_lines(t).join("\n") == t`
/// for every input. No whitespace or `\r` normalization happens.
///
/// # Example
///
/// ```
/// use lineset_core::lines::extract_lines;
///
/// assert_eq!(extract_lines("a\nb\n"), vec!["a", "b", ""]);
/// assert_eq!(extract_lines(""), vec![""]);
/// ```
pub fn extract_lines(text: &str) -> LineSequence {
    text.split(TERMINATOR).map(str::to_string).collect()
}

/// Extract the current content of a source
pub fn extract_source(source: &Source) -> LineSequence {
    extract_lines(&source.text())
}
