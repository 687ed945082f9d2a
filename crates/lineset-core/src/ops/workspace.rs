use std::collections::HashMap;

use crate::errors::{LineSetError, Result};
use crate::model::{Source, SourceId, UniqueView};

/// In-memory session holding the host's sources and the derived views
///
/// Not thread-safe (no Arc/RwLock) - one interactive session drives it
/// serially. All lookups go through here so the handle error taxonomy
/// stays in one place.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    /// Map of source handle to Source
    pub(crate) sources: HashMap<SourceId, Source>,
    /// Map of view name to UniqueView
    pub(crate) views: HashMap<String, UniqueView>,
    /// Source most recently brought to the foreground by Visit
    pub(crate) focused: Option<SourceId>,
}

impl Workspace {
    /// Create a new empty Workspace
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            views: HashMap::new(),
            focused: None,
        }
    }

    /// Get a live source by handle
    ///
    /// # Errors
    ///
    /// Returns `SourceNotFound` if the handle is unknown, or `SourceClosed` if the
    /// host closed it.
    pub fn get_source(&self, id: &SourceId) -> Result<&Source> {
        let source = self
            .sources
            .get(id)
            .ok_or_else(|| LineSetError::SourceNotFound {
                source_id: id.to_string(),
            })?;

        if source.closed {
            return Err(LineSetError::SourceClosed {
                source_id: id.to_string(),
            });
        }

        Ok(source)
    }

    /// Get a mutable reference to a live source by handle
    ///
    /// # Errors
    ///
    /// Returns `SourceNotFound` if the handle is unknown, or `SourceClosed` if the
    /// host closed it.
    pub fn get_source_mut(&mut self, id: &SourceId) -> Result<&mut Source> {
        let source = self
            .sources
            .get_mut(id)
            .ok_or_else(|| LineSetError::SourceNotFound {
                source_id: id.to_string(),
            })?;

        if source.closed {
            return Err(LineSetError::SourceClosed {
                source_id: id.to_string(),
            });
        }

        Ok(source)
    }

    /// Get a view by name
    ///
    /// # Errors
    ///
    /// Returns `ViewNotFound` if no view has this name.
    pub fn get_view(&self, name: &str) -> Result<&UniqueView> {
        self.views
            .get(name)
            .ok_or_else(|| LineSetError::ViewNotFound {
                view: name.to_string(),
            })
    }

    /// Get a mutable reference to a view by name
    ///
    /// # Errors
    ///
    /// Returns `ViewNotFound` if no view has this name.
    pub fn get_view_mut(&mut self, name: &str) -> Result<&mut UniqueView> {
        self.views
            .get_mut(name)
            .ok_or_else(|| LineSetError::ViewNotFound {
                view: name.to_string(),
            })
    }

    /// Resolve a view and a live source together
    ///
    /// Both borrows are handed out only once both lookups succeeded, so a
    /// caller that receives them can mutate without any further fallible step.
    ///
    /// # Errors
    ///
    /// Returns `ViewNotFound`, `SourceNotFound` or `SourceClosed`.
    pub(crate) fn view_and_source_mut(
        &mut self,
        view: &str,
        source: &SourceId,
    ) -> Result<(&mut UniqueView, &mut Source)> {
        let view_ref = self
            .views
            .get_mut(view)
            .ok_or_else(|| LineSetError::ViewNotFound {
                view: view.to_string(),
            })?;
        let source_ref = self
            .sources
            .get_mut(source)
            .ok_or_else(|| LineSetError::SourceNotFound {
                source_id: source.to_string(),
            })?;
        if source_ref.closed {
            return Err(LineSetError::SourceClosed {
                source_id: source.to_string(),
            });
        }
        Ok((view_ref, source_ref))
    }

    /// List all live sources, ordered by handle
    pub fn list_sources(&self) -> Vec<&Source> {
        let mut sources: Vec<&Source> = self.sources.values().filter(|s| !s.closed).collect();
        sources.sort_by(|a, b| a.id.cmp(&b.id));
        sources
    }

    /// List all views, ordered by name
    pub fn list_views(&self) -> Vec<&UniqueView> {
        let mut views: Vec<&UniqueView> = self.views.values().collect();
        views.sort_by(|a, b| a.name.cmp(&b.name));
        views
    }

    /// Insert a source supplied by the host
    pub fn insert_source(&mut self, source: Source) {
        self.sources.insert(source.id.clone(), source);
    }

    /// Insert a view, returning the view it replaced, if any
    pub(crate) fn insert_view(&mut self, view: UniqueView) -> Option<UniqueView> {
        self.views.insert(view.name.clone(), view)
    }

    /// Source last brought to the foreground by a Visit
    pub fn focused(&self) -> Option<&SourceId> {
        self.focused.as_ref()
    }

    pub(crate) fn focus(&mut self, id: SourceId) {
        self.focused = Some(id);
    }
}
