//! Content digests.
//!
//! Deterministic SHA256 digests for source text and comparison results.
//! Views record the digests of both sources when they are computed, so a
//! later digest mismatch tells the host that a view no longer reflects the
//! live sources.

use crate::diff::model::UniqueLines;
use crate::errors::Result;
use sha2::{Digest, Sha256};

/// Digest of a text body.
///
/// Hex-encoded SHA256 (64 characters).
pub fn content_digest(text: &str) -> String {
    hash_string(text)
}

/// Digest of a comparison result.
///
/// Canonical JSON of both unique sequences, so equal results give equal
/// digests regardless of when they were computed.
///
/// ## Errors
///
/// Returns `LineSetError::Serialization` if JSON serialization fails.
pub fn unique_lines_digest(unique: &UniqueLines) -> Result<String> {
    let canonical = serde_json::to_string(unique)?;
    Ok(hash_string(&canonical))
}

fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
