use std::fs;
use std::path::Path;

use lineset_core::errors::LineSetError;
use lineset_core::ops::source_ops::open_source;
use lineset_core::{SourceId, Workspace};

pub mod aligned;
pub mod compare;
pub mod reconcile;

/// Load a file into the workspace as a source named by its path
pub fn load_source(ws: &mut Workspace, path: &Path) -> Result<SourceId, LineSetError> {
    let text = fs::read_to_string(path).map_err(|e| LineSetError::io("read_source", e))?;
    Ok(open_source(ws, path.display().to_string(), &text))
}

/// Load both files of a comparison
pub fn load_pair(
    ws: &mut Workspace,
    a: &Path,
    b: &Path,
) -> Result<(SourceId, SourceId), LineSetError> {
    Ok((load_source(ws, a)?, load_source(ws, b)?))
}
