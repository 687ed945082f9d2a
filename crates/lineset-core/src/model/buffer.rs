use serde::{Deserialize, Serialize};

use crate::lines::TERMINATOR;

/// Mutable line container with a cursor, backing both sources and views
///
/// Text is held as editor lines plus a flag recording whether the last line
/// carries a terminator. `from_text(t).text() == t` for every `t`.
///
/// Line counts are editor line counts: `"a\nb"` and `"a\nb\n"` both have two
/// lines, the empty text has none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineBuffer {
    lines: Vec<String>,
    terminated: bool,
    cursor: usize,
}

impl LineBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a buffer from full text; the cursor starts on the first line
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::new();
        }
        let (body, terminated) = match text.strip_suffix(TERMINATOR) {
            Some(body) => (body, true),
            None => (text, false),
        };
        Self {
            lines: body.split(TERMINATOR).map(str::to_string).collect(),
            terminated,
            cursor: 0,
        }
    }

    /// Build a buffer holding exactly `lines`, one editor line per element
    ///
    /// Empty elements stay visible as blank lines.
    pub fn from_lines(lines: &[String]) -> Self {
        Self {
            lines: lines.to_vec(),
            terminated: !lines.is_empty(),
            cursor: 0,
        }
    }

    /// Full text content
    pub fn text(&self) -> String {
        let mut text = self.lines.join("\n");
        if self.terminated {
            text.push(TERMINATOR);
        }
        text
    }

    /// Editor lines, without terminators
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at `index`, if any
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor; positions past the end are allowed and select nothing
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index;
    }

    /// Line under the cursor, if the cursor is on a line
    pub fn current_line(&self) -> Option<&str> {
        self.line(self.cursor)
    }

    /// Index of the first line exactly equal to `line`
    pub fn position_of(&self, line: &str) -> Option<usize> {
        self.lines.iter().position(|l| l == line)
    }

    /// Remove the lines in `start..end` (clamped), returning them
    pub fn delete_range(&mut self, start: usize, end: usize) -> Vec<String> {
        let end = end.min(self.lines.len());
        if start >= end {
            return Vec::new();
        }
        let removed: Vec<String> = self.lines.drain(start..end).collect();
        self.normalize();
        removed
    }

    /// Remove a single line, returning it
    pub fn delete_line(&mut self, index: usize) -> Option<String> {
        self.delete_range(index, index + 1).pop()
    }

    /// Append `line` as a new last line followed by a terminator
    ///
    /// An unterminated last line gets its terminator first, so the line
    /// count always grows by exactly one.
    pub fn append_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
        self.terminated = true;
    }

    /// Remove every line exactly equal to `line`, returning how many went
    pub fn remove_all(&mut self, line: &str) -> usize {
        let before = self.lines.len();
        self.lines.retain(|l| l != line);
        let removed = before - self.lines.len();
        if removed > 0 {
            self.normalize();
        }
        removed
    }

    /// Number of lines exactly equal to `line`
    pub fn occurrences(&self, line: &str) -> usize {
        self.lines.iter().filter(|l| l.as_str() == line).count()
    }

    fn normalize(&mut self) {
        if self.lines.is_empty() {
            self.terminated = false;
        }
        if self.cursor >= self.lines.len() {
            self.cursor = self.lines.len().saturating_sub(1);
        }
    }
}
