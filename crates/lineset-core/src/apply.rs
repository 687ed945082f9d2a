//! Reconciliation controller
//!
//! This module provides the `apply()` function, the single entry point for
//! Copy, Kill and Visit against a unique-lines view.
//!
//! ## Atomicity Contract
//!
//! The `apply()` function guarantees:
//! - **All-or-nothing**: the view, its cursor line and every source the
//!   command touches are resolved before the first edit; after that point
//!   no step can fail, so a returned error means nothing changed
//! - **No panics**: invalid selections and dead handles return typed errors
//! - **No recompute**: views are edited one line at a time and are never
//!   rebuilt from the sources
//!
//! ## Example
//!
//! ```
//! use lineset_core::{apply, compare, Command, CompareOptions, ReconcileOutcome, Workspace};
//! use lineset_core::ops::source_ops::{open_source, source_text};
//!
//! let mut ws = Workspace::new();
//! let a = open_source(&mut ws, "a.txt", "x\ny\n");
//! let b = open_source(&mut ws, "b.txt", "y\n");
//! compare(&mut ws, &a, &b, &CompareOptions::default()).unwrap();
//!
//! let outcome = apply(&mut ws, Command::Copy { view: "A".into() }).unwrap();
//! assert!(matches!(outcome, ReconcileOutcome::Copied { .. }));
//! assert_eq!(source_text(&ws, &b).unwrap(), "y\nx\n");
//! ```

use std::time::Instant;

use lineset_core_types::{RequestId, Sensitive};
use serde::{Deserialize, Serialize};

use crate::commands::Command;
use crate::errors::{LineSetError, Result};
use crate::model::{SourceId, ViewBinding};
use crate::ops::Workspace;
use crate::{log_op_end, log_op_error, log_op_start};

/// What a reconciliation command did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReconcileOutcome {
    /// Line appended to `target`, which now has `target_line_count` lines
    Copied {
        line: String,
        target: SourceId,
        target_line_count: usize,
    },

    /// `removed` copies of the line purged from `source`
    Killed {
        line: String,
        source: SourceId,
        removed: usize,
    },

    /// Cursor of `source` moved to `line_index` and the source focused
    Visited { source: SourceId, line_index: usize },

    /// The line no longer occurs in `source`; nothing moved
    VisitMiss { source: SourceId },
}

impl ReconcileOutcome {
    /// Short human-readable summary without line contents
    pub fn summary(&self) -> String {
        match self {
            ReconcileOutcome::Copied {
                target_line_count, ..
            } => format!("copied (other source now {} lines)", target_line_count),
            ReconcileOutcome::Killed { removed, .. } => {
                format!("killed ({} occurrence(s) removed)", removed)
            }
            ReconcileOutcome::Visited { line_index, .. } => {
                format!("visited line {}", line_index + 1)
            }
            ReconcileOutcome::VisitMiss { .. } => "visit: line not found".to_string(),
        }
    }
}

/// The resolved target of a command: the cursor line of a view
struct Selection {
    view: String,
    index: usize,
    line: String,
    binding: ViewBinding,
}

/// Apply a reconciliation command to the workspace
///
/// # Errors
///
/// * `ViewNotFound` - If the command names no existing view
/// * `EmptySelection` - If the view is empty or its cursor is past the last line
/// * `SourceNotFound` / `SourceClosed` - If a source bound to the view no longer resolves
///
/// In each of these cases the workspace is left exactly as it was.
pub fn apply(ws: &mut Workspace, cmd: Command) -> Result<ReconcileOutcome> {
    let op = cmd.op_name();
    let request_id = RequestId::new();
    log_op_start!(op, view = cmd.view(), request_id = %request_id);
    let start = Instant::now();

    let result = apply_impl(ws, &cmd).map_err(|e| {
        log_op_error!(
            op,
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = %request_id
        );
        e
    })?;

    log_op_end!(
        op,
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = %request_id
    );

    Ok(result)
}

fn apply_impl(ws: &mut Workspace, cmd: &Command) -> Result<ReconcileOutcome> {
    let selection = select(ws, cmd.view())?;
    tracing::debug!(
        view = %selection.view,
        index = selection.index,
        line = %Sensitive::new(selection.line.as_str()),
        line_len = selection.line.len(),
        "resolved selection"
    );

    match cmd {
        Command::Copy { .. } => copy_line(ws, selection),
        Command::Kill { .. } => kill_line(ws, selection),
        Command::Visit { .. } => visit_line(ws, selection),
    }
}

/// Resolve the cursor line and check that both bound sources are live
fn select(ws: &Workspace, view_name: &str) -> Result<Selection> {
    let view = ws.get_view(view_name)?;
    let index = view.buffer.cursor();
    let line = view
        .buffer
        .current_line()
        .ok_or_else(|| LineSetError::EmptySelection {
            view: view_name.to_string(),
            cursor: index,
            line_count: view.buffer.line_count(),
        })?
        .to_string();

    ws.get_source(&view.binding.this_source)?;
    ws.get_source(&view.binding.other_source)?;

    Ok(Selection {
        view: view_name.to_string(),
        index,
        line,
        binding: view.binding.clone(),
    })
}

/// Copy: append to `other_source`, then drop the line from the view
fn copy_line(ws: &mut Workspace, sel: Selection) -> Result<ReconcileOutcome> {
    let (view, target) = ws.view_and_source_mut(&sel.view, &sel.binding.other_source)?;

    target.buffer.append_line(&sel.line);
    target.touch();
    view.buffer.delete_line(sel.index);

    Ok(ReconcileOutcome::Copied {
        line: sel.line,
        target: sel.binding.other_source,
        target_line_count: target.buffer.line_count(),
    })
}

/// Kill: purge every copy from `this_source`, then drop the line from the view
fn kill_line(ws: &mut Workspace, sel: Selection) -> Result<ReconcileOutcome> {
    let (view, source) = ws.view_and_source_mut(&sel.view, &sel.binding.this_source)?;

    let removed = source.buffer.remove_all(&sel.line);
    if removed > 0 {
        source.touch();
    }
    view.buffer.delete_line(sel.index);
    debug_assert_eq!(source.buffer.occurrences(&sel.line), 0);

    tracing::debug!(source_id = %sel.binding.this_source, removed, "killed line");
    Ok(ReconcileOutcome::Killed {
        line: sel.line,
        source: sel.binding.this_source,
        removed,
    })
}

/// Visit: move `this_source`'s cursor to the first copy of the line
fn visit_line(ws: &mut Workspace, sel: Selection) -> Result<ReconcileOutcome> {
    let source_id = sel.binding.this_source;
    let source = ws.get_source_mut(&source_id)?;

    match source.buffer.position_of(&sel.line) {
        Some(line_index) => {
            source.buffer.set_cursor(line_index);
            ws.focus(source_id.clone());
            Ok(ReconcileOutcome::Visited {
                source: source_id,
                line_index,
            })
        }
        None => {
            tracing::debug!(source_id = %source_id, "visit found no match");
            Ok(ReconcileOutcome::VisitMiss { source: source_id })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{compare, CompareOptions};
    use crate::ops::source_ops::{close_source, open_source};

    fn setup(a: &str, b: &str) -> (Workspace, SourceId, SourceId) {
        let mut ws = Workspace::new();
        let id_a = open_source(&mut ws, "a", a);
        let id_b = open_source(&mut ws, "b", b);
        compare(&mut ws, &id_a, &id_b, &CompareOptions::default()).unwrap();
        (ws, id_a, id_b)
    }

    #[test]
    fn test_copy_appends_to_other_source() {
        let (mut ws, a, b) = setup("x\ny\n", "y\n");

        apply(&mut ws, Command::Copy { view: "A".into() }).unwrap();

        assert_eq!(ws.get_source(&b).unwrap().text(), "y\nx\n");
        assert_eq!(ws.get_source(&a).unwrap().text(), "x\ny\n");
        assert!(ws.get_view("A").unwrap().is_empty());
    }

    #[test]
    fn test_empty_view_is_empty_selection() {
        let (mut ws, _a, _b) = setup("y\n", "y\n");

        let result = apply(&mut ws, Command::Kill { view: "A".into() });
        assert!(matches!(result, Err(LineSetError::EmptySelection { .. })));
    }

    #[test]
    fn test_closed_other_source_blocks_copy_without_edit() {
        let (mut ws, _a, b) = setup("x\n", "");
        close_source(&mut ws, &b).unwrap();

        let result = apply(&mut ws, Command::Copy { view: "A".into() });

        assert!(matches!(result, Err(LineSetError::SourceClosed { .. })));
        assert_eq!(ws.get_view("A").unwrap().lines(), ["x".to_string()]);
    }

    #[test]
    fn test_visit_focuses_source() {
        let (mut ws, a, _b) = setup("q\nx\n", "q\n");

        let outcome = apply(&mut ws, Command::Visit { view: "A".into() }).unwrap();

        assert_eq!(
            outcome,
            ReconcileOutcome::Visited {
                source: a.clone(),
                line_index: 1
            }
        );
        assert_eq!(ws.focused(), Some(&a));
        assert_eq!(ws.get_source(&a).unwrap().buffer.cursor(), 1);
    }

    #[test]
    fn test_summary_hides_line_content() {
        let outcome = ReconcileOutcome::Killed {
            line: "secret=1".into(),
            source: SourceId::from_string("s"),
            removed: 2,
        };
        assert!(!outcome.summary().contains("secret"));
    }
}
