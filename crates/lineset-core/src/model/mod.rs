pub mod buffer;
pub mod source;
pub mod view;

pub use buffer::LineBuffer;
pub use source::{Source, SourceId};
pub use view::{UniqueView, ViewBinding};
