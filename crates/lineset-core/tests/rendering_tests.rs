//! Rendering Tests
//!
//! ## Scenarios Covered
//!
//! 1. Text rendering of a view follows reconciliation edits
//! 2. JSON comparison report shape

mod common;

use common::compared_pair;
use lineset_core::ops::source_ops::open_source;
use lineset_core::render::{render_comparison_json, render_view};
use lineset_core::{apply, compare, Command, CompareOptions, LineSetError, Workspace};

#[test]
fn test_render_view_after_copy() {
    // GIVEN A = x,z and B empty
    let (mut ws, _a, _b) = compared_pair(&["x", "z"], &[]);

    // WHEN x is copied
    apply(&mut ws, Command::Copy { view: "A".into() }).unwrap();

    // THEN the rendering shows only z, under the cursor
    let output = render_view(&ws, "A").unwrap();
    assert_eq!(
        output,
        "== A (1 lines only in a.txt, not in b.txt) ==\n> z\n"
    );
}

#[test]
fn test_render_unknown_view() {
    let ws = Workspace::new();
    assert!(matches!(
        render_view(&ws, "A"),
        Err(LineSetError::ViewNotFound { .. })
    ));
}

#[test]
fn test_json_report_marks_stale_views() {
    // GIVEN a comparison with custom view names
    let mut ws = Workspace::new();
    let a = open_source(&mut ws, "left.txt", "x\ny\n");
    let b = open_source(&mut ws, "right.txt", "y\nw\n");
    let options = CompareOptions::default().with_view_names("L", "R");
    let cmp = compare(&mut ws, &a, &b, &options).unwrap();

    // WHEN w is copied into the left source
    apply(&mut ws, Command::Copy { view: "R".into() }).unwrap();

    // THEN the report lists the remaining lines and flags both views stale
    let json = render_comparison_json(&ws, &cmp).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["reconciled"], false);
    assert_eq!(value["views"][0]["name"], "L");
    assert_eq!(value["views"][0]["this_source"], "left.txt");
    assert_eq!(value["views"][0]["lines"], serde_json::json!(["x"]));
    assert_eq!(value["views"][1]["lines"], serde_json::json!([]));
    assert_eq!(value["views"][0]["stale"], true);
    assert_eq!(value["views"][1]["stale"], true);
}
