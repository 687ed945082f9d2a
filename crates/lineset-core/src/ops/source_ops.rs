use lineset_core_types::Sensitive;

use super::workspace::Workspace;
use crate::errors::Result;
use crate::lines::{extract_source, LineSequence};
use crate::model::{LineBuffer, Source, SourceId};

/// Open a new source holding `text`, as the host does when it loads a file
///
/// Generates a UUID v7 handle for the source.
pub fn open_source(ws: &mut Workspace, name: impl Into<String>, text: &str) -> SourceId {
    let id = SourceId::new();
    let source = Source::new(id.clone(), name, text);
    tracing::debug!(
        source_id = %id,
        name = %source.name,
        line_count = source.buffer.line_count(),
        "opened source"
    );
    ws.insert_source(source);
    id
}

/// Close a source (tombstone only)
///
/// Views that still reference the source keep existing, but every
/// reconciliation action that needs it fails with `SourceClosed`.
///
/// # Errors
/// * `SourceNotFound` - If the handle is unknown
/// * `SourceClosed` - If the source was already closed
pub fn close_source(ws: &mut Workspace, id: &SourceId) -> Result<()> {
    let source = ws.get_source_mut(id)?;
    source.closed = true;
    source.touch();
    tracing::debug!(source_id = %id, "closed source");
    Ok(())
}

/// Current full text of a live source
///
/// # Errors
/// * `SourceNotFound` / `SourceClosed` - If the handle does not resolve
pub fn source_text(ws: &Workspace, id: &SourceId) -> Result<String> {
    Ok(ws.get_source(id)?.text())
}

/// Extract the line sequence of a live source
///
/// # Errors
/// * `SourceNotFound` / `SourceClosed` - If the handle does not resolve
pub fn source_lines(ws: &Workspace, id: &SourceId) -> Result<LineSequence> {
    Ok(extract_source(ws.get_source(id)?))
}

/// Replace the whole content of a live source (host-side reload)
///
/// The cursor returns to the first line.
///
/// # Errors
/// * `SourceNotFound` / `SourceClosed` - If the handle does not resolve
pub fn replace_text(ws: &mut Workspace, id: &SourceId, text: &str) -> Result<()> {
    let source = ws.get_source_mut(id)?;
    source.buffer = LineBuffer::from_text(text);
    source.touch();
    tracing::debug!(
        source_id = %id,
        text = %Sensitive::new(text),
        text_len = text.len(),
        "replaced source text"
    );
    Ok(())
}
