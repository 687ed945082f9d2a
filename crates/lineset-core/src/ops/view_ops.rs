use super::workspace::Workspace;
use crate::diff::UniqueLines;
use crate::errors::{LineSetError, Result};
use crate::model::{SourceId, UniqueView, ViewBinding};

/// Build the two unique-lines views for a comparison of `a` and `b`
///
/// View `names.0` lists `unique.unique_a` and is bound this=A, other=B;
/// view `names.1` lists `unique.unique_b` and is bound this=B, other=A.
/// Views already registered under either name are discarded, never merged.
///
/// # Errors
/// * `DuplicateViewName` - If both names are equal
/// * `SourceNotFound` / `SourceClosed` - If either source does not resolve
pub fn materialize_views(
    ws: &mut Workspace,
    a: &SourceId,
    b: &SourceId,
    unique: &UniqueLines,
    names: (&str, &str),
) -> Result<()> {
    let (name_a, name_b) = names;
    if name_a == name_b {
        return Err(LineSetError::DuplicateViewName {
            name: name_a.to_string(),
        });
    }

    let digest_a = ws.get_source(a)?.digest();
    let digest_b = ws.get_source(b)?.digest();

    let view_a = UniqueView::new(
        name_a,
        &unique.unique_a,
        ViewBinding::new(a.clone(), b.clone()),
        digest_a.clone(),
        digest_b.clone(),
    );
    let view_b = UniqueView::new(
        name_b,
        &unique.unique_b,
        ViewBinding::new(b.clone(), a.clone()),
        digest_b,
        digest_a,
    );

    for view in [view_a, view_b] {
        let name = view.name.clone();
        let line_count = view.buffer.line_count();
        let replaced = ws.insert_view(view).is_some();
        tracing::debug!(view = %name, line_count, replaced, "materialized view");
    }

    Ok(())
}

/// Dismiss a view without touching either source
///
/// # Errors
/// * `ViewNotFound` - If no view has this name
pub fn close_view(ws: &mut Workspace, name: &str) -> Result<UniqueView> {
    let view = ws
        .views
        .remove(name)
        .ok_or_else(|| LineSetError::ViewNotFound {
            view: name.to_string(),
        })?;
    tracing::debug!(view = %name, remaining = view.buffer.line_count(), "closed view");
    Ok(view)
}

/// Put the view cursor on line `index`
///
/// An index past the last line is accepted; it selects nothing and any
/// reconciliation action then fails with `EmptySelection`.
///
/// # Errors
/// * `ViewNotFound` - If no view has this name
pub fn goto_view_line(ws: &mut Workspace, name: &str, index: usize) -> Result<()> {
    ws.get_view_mut(name)?.buffer.set_cursor(index);
    Ok(())
}

/// Put the view cursor on the first line exactly equal to `line`
///
/// Returns the index found, or `None` with the cursor left where it was.
///
/// # Errors
/// * `ViewNotFound` - If no view has this name
pub fn find_in_view(ws: &mut Workspace, name: &str, line: &str) -> Result<Option<usize>> {
    let view = ws.get_view_mut(name)?;
    let found = view.buffer.position_of(line);
    if let Some(index) = found {
        view.buffer.set_cursor(index);
    }
    Ok(found)
}

/// Whether either bound source changed since the view was computed
///
/// Reconciliation edits make views stale by design; this only tells the
/// host that a fresh `compare` would list different lines.
///
/// # Errors
/// * `ViewNotFound` - If no view has this name
/// * `SourceNotFound` / `SourceClosed` - If a bound source does not resolve
pub fn view_is_stale(ws: &Workspace, name: &str) -> Result<bool> {
    let view = ws.get_view(name)?;
    let this = ws.get_source(&view.binding.this_source)?;
    let other = ws.get_source(&view.binding.other_source)?;
    Ok(this.digest() != view.this_digest || other.digest() != view.other_digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffMode;
    use crate::ops::source_ops::open_source;

    fn unique(a: &[&str], b: &[&str]) -> UniqueLines {
        UniqueLines {
            mode: DiffMode::Multiset,
            unique_a: a.iter().map(|s| s.to_string()).collect(),
            unique_b: b.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_views_are_cross_bound() {
        let mut ws = Workspace::new();
        let a = open_source(&mut ws, "a", "x\ny\n");
        let b = open_source(&mut ws, "b", "y\nw\n");

        materialize_views(&mut ws, &a, &b, &unique(&["x"], &["w"]), ("A", "B")).unwrap();

        let view_a = ws.get_view("A").unwrap();
        assert_eq!(view_a.binding.this_source, a);
        assert_eq!(view_a.binding.other_source, b);
        let view_b = ws.get_view("B").unwrap();
        assert_eq!(view_b.binding.this_source, b);
        assert_eq!(view_b.binding.other_source, a);
        assert_eq!(view_b.lines(), ["w".to_string()]);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut ws = Workspace::new();
        let a = open_source(&mut ws, "a", "x\n");
        let b = open_source(&mut ws, "b", "y\n");

        let result = materialize_views(&mut ws, &a, &b, &unique(&[], &[]), ("V", "V"));
        assert!(matches!(
            result,
            Err(LineSetError::DuplicateViewName { .. })
        ));
        assert!(ws.list_views().is_empty());
    }

    #[test]
    fn test_find_in_view_moves_cursor() {
        let mut ws = Workspace::new();
        let a = open_source(&mut ws, "a", "");
        let b = open_source(&mut ws, "b", "");
        materialize_views(&mut ws, &a, &b, &unique(&["p", "q"], &[]), ("A", "B")).unwrap();

        assert_eq!(find_in_view(&mut ws, "A", "q").unwrap(), Some(1));
        assert_eq!(ws.get_view("A").unwrap().buffer.current_line(), Some("q"));
        assert_eq!(find_in_view(&mut ws, "A", "zz").unwrap(), None);
        assert_eq!(ws.get_view("A").unwrap().buffer.cursor(), 1);
    }

    #[test]
    fn test_close_view_leaves_sources() {
        let mut ws = Workspace::new();
        let a = open_source(&mut ws, "a", "x\n");
        let b = open_source(&mut ws, "b", "");
        materialize_views(&mut ws, &a, &b, &unique(&["x"], &[]), ("A", "B")).unwrap();

        let closed = close_view(&mut ws, "A").unwrap();
        assert_eq!(closed.lines(), ["x".to_string()]);
        assert!(ws.get_view("A").is_err());
        assert_eq!(ws.get_source(&a).unwrap().text(), "x\n");
    }

    #[test]
    fn test_stale_after_source_edit() {
        let mut ws = Workspace::new();
        let a = open_source(&mut ws, "a", "x\n");
        let b = open_source(&mut ws, "b", "");
        materialize_views(&mut ws, &a, &b, &unique(&["x"], &[]), ("A", "B")).unwrap();
        assert!(!view_is_stale(&ws, "A").unwrap());

        ws.get_source_mut(&b).unwrap().buffer.append_line("x");

        assert!(view_is_stale(&ws, "A").unwrap());
        assert!(view_is_stale(&ws, "B").unwrap());
    }
}
