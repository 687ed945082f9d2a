use serde::Serialize;

use crate::compare::Comparison;
use crate::errors::Result;
use crate::ops::view_ops::view_is_stale;
use crate::ops::Workspace;

/// Render a view as plain text for display
///
/// Generates:
/// - A header naming the view and its two bound sources
/// - One line per view entry, the cursor line marked with `>`
///
/// # Errors
/// * `ViewNotFound` - If no view has this name
/// * `SourceNotFound` / `SourceClosed` - If a bound source does not resolve
pub fn render_view(ws: &Workspace, name: &str) -> Result<String> {
    let view = ws.get_view(name)?;
    let this = ws.get_source(&view.binding.this_source)?;
    let other = ws.get_source(&view.binding.other_source)?;

    let mut output = String::new();
    output.push_str(&format!(
        "== {} ({} lines only in {}, not in {}) ==\n",
        view.name,
        view.buffer.line_count(),
        this.name,
        other.name
    ));

    let cursor = view.buffer.cursor();
    for (index, line) in view.lines().iter().enumerate() {
        let marker = if index == cursor { '>' } else { ' ' };
        output.push_str(&format!("{} {}\n", marker, line));
    }

    Ok(output)
}

#[derive(Debug, Serialize)]
struct ViewReport<'a> {
    name: &'a str,
    this_source: &'a str,
    other_source: &'a str,
    lines: &'a [String],
    stale: bool,
}

#[derive(Debug, Serialize)]
struct ComparisonReport<'a> {
    mode: String,
    digest: &'a str,
    reconciled: bool,
    views: Vec<ViewReport<'a>>,
}

/// Render the current state of a comparison's two views as pretty JSON
///
/// Lines reflect any reconciliation applied since the comparison ran.
///
/// # Errors
/// * `ViewNotFound` - If a view of the comparison was closed
/// * `SourceNotFound` / `SourceClosed` - If a bound source does not resolve
/// * `Serialization` - If the report cannot be encoded
pub fn render_comparison_json(ws: &Workspace, comparison: &Comparison) -> Result<String> {
    let mut views = Vec::with_capacity(2);
    for name in [&comparison.view_a, &comparison.view_b] {
        let view = ws.get_view(name)?;
        let this = ws.get_source(&view.binding.this_source)?;
        let other = ws.get_source(&view.binding.other_source)?;
        views.push(ViewReport {
            name: &view.name,
            this_source: &this.name,
            other_source: &other.name,
            lines: view.lines(),
            stale: view_is_stale(ws, name)?,
        });
    }

    let report = ComparisonReport {
        mode: comparison.unique.mode.to_string(),
        digest: &comparison.digest,
        reconciled: views.iter().all(|v| v.lines.is_empty()),
        views,
    };

    Ok(serde_json::to_string_pretty(&report)?)
}
