//! # tiptree
//!
//! Converts the HTML produced by a PDF-to-HTML extractor into block/inline
//! rich-text editor documents (the ProseMirror/Tiptap JSON shape).
//!
//! ## Features
//!
//! - Classifies extractor markup into editor node kinds; unknown markup is
//!   spliced away instead of failing the conversion
//! - Groups loose inline runs into paragraphs and accumulates nested marks
//! - Attaches heading levels, formulas, code languages and image sources
//! - Locates free text in the converted tree by node id
//! - Renders documents to Markdown
//!
//! ## Quick Start
//!
//! ```
//! use tiptree::{html_to_doc, NodeKind};
//!
//! let doc = html_to_doc("<h2>Scope</h2><div>The <b>quick</b> brown fox</div>").unwrap();
//!
//! assert_eq!(doc.content[0].kind(), Some(NodeKind::Heading));
//! assert_eq!(doc.content[1].kind(), Some(NodeKind::Paragraph));
//!
//! let id = doc.locate("quick brown").unwrap();
//! assert_eq!(id, doc.content[1].id());
//!
//! let json = doc.to_json().unwrap();
//! assert!(json.starts_with(r#"{"type":"doc","content":["#));
//! ```
//!
//! ## Options and diagnostics
//!
//! [`Converter`] takes [`ConvertOptions`] and returns the recovered
//! per-element problems next to the document:
//!
//! ```
//! use tiptree::{ConvertOptions, Converter};
//!
//! let converter = Converter::new(ConvertOptions::default().with_max_depth(64));
//! let conversion = converter
//!     .convert(r#"<div block-type="Equation">no formula here</div>"#)
//!     .unwrap();
//!
//! assert_eq!(conversion.issues.len(), 1);
//! assert_eq!(conversion.document.content.len(), 1);
//! ```

pub mod convert;
pub mod dom;
pub mod error;
pub mod extract;
pub mod markdown;
pub mod model;
pub mod normalize;
pub mod query;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use convert::{Conversion, ConvertOptions, Converter};
pub use error::{Error, Result};
pub use extract::{Extractor, ExtractorHandle};
pub use model::{Attrs, ContainerNode, Document, Mark, MarkType, Node, NodeKind, TextNode};

/// Convert HTML with default options, discarding recovered issues.
pub fn html_to_doc(html: &str) -> Result<Document> {
    Converter::default()
        .convert(html)
        .map(|conversion| conversion.document)
}
