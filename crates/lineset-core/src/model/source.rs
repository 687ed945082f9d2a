use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::buffer::LineBuffer;
use crate::digest::content_digest;

/// Handle identifying a source within a workspace
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceId(String);

impl SourceId {
    /// Generate a new handle using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap an existing identifier (host-chosen handles, deserialization)
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl Default for SourceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source - an authoritative, mutable text container owned by the host
///
/// The comparison and reconciliation code only ever edits a source's lines;
/// opening and closing sources is the host's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Handle for this source
    pub id: SourceId,

    /// Display name (a file path in the CLI host)
    pub name: String,

    /// Line content and cursor
    pub buffer: LineBuffer,

    /// Timestamp when this source was opened
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last content edit
    pub updated_at: DateTime<Utc>,

    /// Tombstone flag - a closed source no longer resolves
    pub closed: bool,
}

impl Source {
    /// Create a new open source with the given handle, name and text
    pub fn new(id: SourceId, name: impl Into<String>, text: &str) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            buffer: LineBuffer::from_text(text),
            created_at: now,
            updated_at: now,
            closed: false,
        }
    }

    /// Full text content
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// SHA256 hex digest of the current text
    pub fn digest(&self) -> String {
        content_digest(&self.text())
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Record a content edit
    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
