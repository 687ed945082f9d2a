use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::buffer::LineBuffer;
use super::source::SourceId;

/// Per-view record of which sources a view was derived from
///
/// Both handles are non-owning links into the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewBinding {
    /// The source whose unique lines this view lists
    pub this_source: SourceId,

    /// The counterpart source; Copy appends here
    pub other_source: SourceId,
}

impl ViewBinding {
    pub fn new(this_source: SourceId, other_source: SourceId) -> Self {
        Self {
            this_source,
            other_source,
        }
    }
}

/// UniqueView - a live, editable list of lines unique to one source
///
/// Holds the lines of `this_source` that had no counterpart in
/// `other_source` when the view was computed. Reconciliation edits the view
/// line by line; it is never recomputed in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueView {
    /// View name, conventionally "A" or "B"
    pub name: String,

    /// Remaining unique lines and the cursor
    pub buffer: LineBuffer,

    pub binding: ViewBinding,

    /// Timestamp when this view was computed
    pub created_at: DateTime<Utc>,

    /// Digest of `this_source` at computation time
    pub this_digest: String,

    /// Digest of `other_source` at computation time
    pub other_digest: String,
}

impl UniqueView {
    /// Create a view over `unique` lines with the cursor on the first line
    pub fn new(
        name: impl Into<String>,
        unique: &[String],
        binding: ViewBinding,
        this_digest: String,
        other_digest: String,
    ) -> Self {
        Self {
            name: name.into(),
            buffer: LineBuffer::from_lines(unique),
            binding,
            created_at: Utc::now(),
            this_digest,
            other_digest,
        }
    }

    /// Lines still listed in the view
    pub fn lines(&self) -> &[String] {
        self.buffer.lines()
    }

    /// Whether every unique line has been reconciled away
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
