//! XML tree layer over the external parser
//!
//! The byte-level work (tokenizing, entity handling, escaping) is done
//! by quick-xml. This module only decides what tree to build from the
//! event stream and how to hand a tree back to the writer.

pub mod model;
pub mod reader;
pub mod writer;

pub use model::{Document, Element, Node, NodeKind};
pub use reader::LoadOptions;
pub use writer::Declaration;
