//! Editor document model.
//!
//! This module contains:
//! - Node kinds and the text/container node sum type
//! - Formatting marks attached to text leaves
//! - Typed node attributes (heading level, formula, language, href, ...)
//! - The `doc` root wrapper and its JSON wire format
//! - Depth-first iteration over a node forest

mod document;
mod iter;
mod mark;
mod node;
mod wire;

pub use document::Document;
pub use iter::DfsIter;
pub use mark::{Mark, MarkAttrs, MarkType};
pub use node::{Attrs, ContainerNode, Node, NodeKind, TextNode};
