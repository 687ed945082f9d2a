//! LineSet Core - line-set difference and reconciliation
//!
//! This crate compares two text sources as multisets of lines and keeps two
//! live "unique lines" views in step with the sources while the user
//! reconciles them:
//! - Line extraction and the set-difference engine (multiset or set mode)
//! - View materialization with per-view source bindings
//! - The reconciliation controller (Copy, Kill, Visit)
//! - Structured errors and the logging facility shared by every crate
//!
//! Sources live in a [`Workspace`] supplied by the host; nothing here touches
//! the filesystem.

pub mod apply;
pub mod commands;
pub mod compare;
pub mod diff;
pub mod digest;
pub mod errors;
pub mod lines;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod render;

// Used by the logging macros through `$crate`
pub use lineset_core_types;

// Re-export commonly used types
pub use apply::{apply, ReconcileOutcome};
pub use commands::Command;
pub use compare::{compare, CompareOptions, Comparison};
pub use diff::{DiffMode, UniqueLines};
pub use errors::{ExError, ExErrorKind, LineSetError, Result};
pub use model::{LineBuffer, Source, SourceId, UniqueView, ViewBinding};
pub use ops::Workspace;
