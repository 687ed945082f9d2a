//! Apply Atomicity Tests
//!
//! This test suite verifies that a failed reconciliation command leaves the
//! workspace exactly as it found it.
//!
//! ## Scenarios Covered
//!
//! 1. Unknown view
//! 2. Empty view and cursor past the last line
//! 3. Closed other source blocks Copy, closed own source blocks Kill and Visit
//! 4. Typed errors, never panics

mod common;

use common::compared_pair;
use lineset_core::ops::source_ops::close_source;
use lineset_core::ops::view_ops::goto_view_line;
use lineset_core::{apply, Command, LineSetError, Workspace};

fn snapshot(ws: &Workspace) -> Workspace {
    ws.clone()
}

fn assert_unchanged(before: &Workspace, after: &Workspace) {
    for name in ["A", "B"] {
        assert_eq!(
            before.get_view(name).unwrap().buffer,
            after.get_view(name).unwrap().buffer,
            "view {} changed",
            name
        );
    }
    let (sources_before, sources_after) = (before.list_sources(), after.list_sources());
    assert_eq!(sources_before.len(), sources_after.len());
    for (b, a) in sources_before.into_iter().zip(sources_after) {
        assert_eq!(b.buffer, a.buffer, "source {} changed", b.name);
    }
}

#[test]
fn test_unknown_view_is_typed_error() {
    // GIVEN compared sources
    let (mut ws, _a, _b) = compared_pair(&["x"], &["y"]);
    let before = snapshot(&ws);

    // WHEN a command names a view that does not exist
    let result = apply(&mut ws, Command::Copy { view: "C".into() });

    // THEN it fails with ViewNotFound and nothing moved
    assert!(matches!(result, Err(LineSetError::ViewNotFound { .. })));
    assert_unchanged(&before, &ws);
}

#[test]
fn test_empty_view_fails_fast() {
    // GIVEN identical sources, so both views are empty
    let (mut ws, _a, _b) = compared_pair(&["x"], &["x"]);
    let before = snapshot(&ws);

    for cmd in [
        Command::Copy { view: "A".into() },
        Command::Kill { view: "B".into() },
        Command::Visit { view: "A".into() },
    ] {
        // WHEN any action is applied
        let result = apply(&mut ws, cmd);

        // THEN it is an EmptySelection
        assert!(matches!(result, Err(LineSetError::EmptySelection { .. })));
    }
    assert_unchanged(&before, &ws);
}

#[test]
fn test_cursor_past_end_fails_fast() {
    let (mut ws, _a, _b) = compared_pair(&["x", "z"], &[]);
    goto_view_line(&mut ws, "A", 7).unwrap();
    let before = snapshot(&ws);

    let result = apply(&mut ws, Command::Kill { view: "A".into() });

    match result {
        Err(LineSetError::EmptySelection {
            view,
            cursor,
            line_count,
        }) => {
            assert_eq!(view, "A");
            assert_eq!(cursor, 7);
            assert_eq!(line_count, 2);
        }
        other => panic!("expected EmptySelection, got {:?}", other),
    }
    assert_unchanged(&before, &ws);
}

#[test]
fn test_closed_other_source_blocks_copy() {
    // GIVEN B has been closed by the host
    let (mut ws, a, b) = compared_pair(&["x"], &[]);
    close_source(&mut ws, &b).unwrap();

    // WHEN x is copied from view A
    let result = apply(&mut ws, Command::Copy { view: "A".into() });

    // THEN it fails and view A still lists x
    assert!(matches!(result, Err(LineSetError::SourceClosed { .. })));
    assert_eq!(ws.get_view("A").unwrap().lines(), ["x".to_string()]);
    assert_eq!(ws.get_source(&a).unwrap().text(), "x\n");
}

#[test]
fn test_closed_own_source_blocks_kill_and_visit() {
    let (mut ws, a, _b) = compared_pair(&["x"], &[]);
    close_source(&mut ws, &a).unwrap();

    for cmd in [
        Command::Kill { view: "A".into() },
        Command::Visit { view: "A".into() },
        // Copy needs both ends live as well
        Command::Copy { view: "A".into() },
    ] {
        let result = apply(&mut ws, cmd);
        assert!(matches!(result, Err(LineSetError::SourceClosed { .. })));
    }
    assert_eq!(ws.get_view("A").unwrap().lines(), ["x".to_string()]);
    assert_eq!(ws.focused(), None);
}

#[test]
fn test_success_after_failure_uses_untouched_state() {
    // GIVEN a failed command
    let (mut ws, _a, b) = compared_pair(&["x"], &[]);
    let _ = apply(&mut ws, Command::Copy { view: "nope".into() });

    // WHEN the valid command follows
    apply(&mut ws, Command::Copy { view: "A".into() }).unwrap();

    // THEN it behaves as if the failure never happened
    assert_eq!(ws.get_source(&b).unwrap().text(), "x\n");
}
