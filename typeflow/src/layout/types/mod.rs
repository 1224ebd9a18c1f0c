//! Type definitions for documents, embedded blocks, and the engine's
//! internal render instructions.

pub mod block;
pub mod doc;
pub mod instruction;

pub use block::{Block, RowSink};
pub use doc::Doc;
