//! Top-level comparison
//!
//! `compare()` runs extraction, the set-difference engine and the view
//! materializer for a pair of sources. It owns the logging boundary for the
//! whole pipeline.

use std::time::Instant;

use lineset_core_types::RequestId;
use serde::{Deserialize, Serialize};

use crate::diff::{compute_unique, DiffMode, UniqueLines};
use crate::digest::unique_lines_digest;
use crate::errors::Result;
use crate::lines::extract_source;
use crate::model::SourceId;
use crate::ops::view_ops::materialize_views;
use crate::ops::Workspace;
use crate::{log_op_end, log_op_error, log_op_start};

/// Options for a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareOptions {
    /// Counting mode for repeated lines
    pub mode: DiffMode,
    /// Names for the A-side and B-side views
    pub view_names: (String, String),
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            mode: DiffMode::Multiset,
            view_names: ("A".to_string(), "B".to_string()),
        }
    }
}

impl CompareOptions {
    pub fn with_mode(mut self, mode: DiffMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_view_names(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.view_names = (a.into(), b.into());
        self
    }
}

/// Result of a comparison: the unique lines and where their views live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub source_a: SourceId,
    pub source_b: SourceId,
    pub unique: UniqueLines,
    /// Digest of `unique`; equal for equal results
    pub digest: String,
    /// Name of the view listing lines unique to A
    pub view_a: String,
    /// Name of the view listing lines unique to B
    pub view_b: String,
}

/// Compare two sources and (re)build their unique-lines views
///
/// Any views already registered under the configured names are replaced
/// with fresh content.
///
/// # Errors
///
/// * `SourceNotFound` / `SourceClosed` - If either handle does not resolve
/// * `DuplicateViewName` - If both view names are equal
pub fn compare(
    ws: &mut Workspace,
    a: &SourceId,
    b: &SourceId,
    options: &CompareOptions,
) -> Result<Comparison> {
    let request_id = RequestId::new();
    log_op_start!(
        "compare",
        source_a = %a,
        source_b = %b,
        mode = %options.mode,
        request_id = %request_id
    );
    let start = Instant::now();

    let result = compare_impl(ws, a, b, options).map_err(|e| {
        log_op_error!(
            "compare",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = %request_id
        );
        e
    })?;

    log_op_end!(
        "compare",
        duration_ms = start.elapsed().as_millis() as u64,
        unique_a_len = result.unique.unique_a.len(),
        unique_b_len = result.unique.unique_b.len(),
        request_id = %request_id
    );

    Ok(result)
}

fn compare_impl(
    ws: &mut Workspace,
    a: &SourceId,
    b: &SourceId,
    options: &CompareOptions,
) -> Result<Comparison> {
    let seq_a = extract_source(ws.get_source(a)?);
    let seq_b = extract_source(ws.get_source(b)?);

    let unique = compute_unique(&seq_a, &seq_b, options.mode);
    let digest = unique_lines_digest(&unique)?;

    let (name_a, name_b) = &options.view_names;
    materialize_views(ws, a, b, &unique, (name_a, name_b))?;

    Ok(Comparison {
        source_a: a.clone(),
        source_b: b.clone(),
        unique,
        digest,
        view_a: name_a.clone(),
        view_b: name_b.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LineSetError;
    use crate::ops::source_ops::open_source;

    #[test]
    fn test_compare_builds_both_views() {
        let mut ws = Workspace::new();
        let a = open_source(&mut ws, "a", "x\ny\nz\n");
        let b = open_source(&mut ws, "b", "y\nw\n");

        let cmp = compare(&mut ws, &a, &b, &CompareOptions::default()).unwrap();

        assert_eq!(cmp.unique.unique_a, vec!["x", "z"]);
        assert_eq!(cmp.unique.unique_b, vec!["w"]);
        assert_eq!(ws.get_view("A").unwrap().lines(), ["x", "z"]);
        assert_eq!(ws.get_view("B").unwrap().lines(), ["w"]);
    }

    #[test]
    fn test_unknown_source_is_rejected() {
        let mut ws = Workspace::new();
        let a = open_source(&mut ws, "a", "x\n");
        let missing = SourceId::from_string("missing");

        let result = compare(&mut ws, &a, &missing, &CompareOptions::default());
        assert!(matches!(result, Err(LineSetError::SourceNotFound { .. })));
        assert!(ws.list_views().is_empty());
    }

    #[test]
    fn test_custom_view_names() {
        let mut ws = Workspace::new();
        let a = open_source(&mut ws, "a", "x\n");
        let b = open_source(&mut ws, "b", "");

        let options = CompareOptions::default().with_view_names("left", "right");
        let cmp = compare(&mut ws, &a, &b, &options).unwrap();

        assert_eq!(cmp.view_a, "left");
        assert_eq!(ws.get_view("left").unwrap().lines(), ["x"]);
    }
}
