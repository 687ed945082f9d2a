pub mod source_ops;
pub mod view_ops;
pub mod workspace;

pub use workspace::Workspace;
