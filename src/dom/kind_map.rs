//! Maps source elements to editor node kinds.
//!
//! The upstream extractor tags blocks either with a plain HTML element or with
//! an explicit `block-type` attribute naming the block. Both go through the
//! same fixed table; anything not in it is `skip` and is spliced away later.

use super::{attribute, is_element, is_text, local_name, Handle};
use crate::model::NodeKind;

/// What an element turns into in the editor tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementClass {
    /// Inline formatting; its text becomes marked text leaves.
    Text,
    /// A container of the given kind (possibly `skip`).
    Container(NodeKind),
}

impl ElementClass {
    /// Container kind, `None` for inline elements.
    pub fn kind(self) -> Option<NodeKind> {
        match self {
            ElementClass::Text => None,
            ElementClass::Container(kind) => Some(kind),
        }
    }
}

/// Classify an element, preferring its `block-type` attribute over its tag.
///
/// Non-element nodes classify as `skip`.
pub fn classify(handle: &Handle) -> ElementClass {
    if let Some(block_type) = attribute(handle, "block-type") {
        return class_for_name(&block_type);
    }
    local_name(handle).map_or(ElementClass::Container(NodeKind::Skip), class_for_name)
}

/// Map a tag name or `block-type` value through the fixed table.
pub fn class_for_name(name: &str) -> ElementClass {
    let kind = match name {
        // Headings
        "h1" | "h2" | "h3" | "h4" => NodeKind::Heading,

        // Tables; html5ever always inserts the tbody
        "tbody" => NodeKind::Table,
        "tr" => NodeKind::TableRow,
        "th" => NodeKind::TableHeader,
        "td" => NodeKind::TableCell,

        "img" => NodeKind::Image,

        // Lists
        "ul" => NodeKind::BulletList,
        "li" | "ListItem" => NodeKind::ListItem,

        "blockquote" => NodeKind::BlockQuote,
        "Equation" => NodeKind::Math,
        "pre" | "Code" => NodeKind::CodeBlock,

        // Inline formatting
        "b" | "i" | "a" | "sup" => return ElementClass::Text,

        _ => NodeKind::Skip,
    };
    ElementClass::Container(kind)
}

/// Whether a sibling joins an inline run: text nodes and inline elements do.
///
/// Comments and other non-element nodes are neither inline nor blocks; the
/// grouper ignores them.
pub fn is_inline(handle: &Handle) -> bool {
    is_text(handle) || (is_element(handle) && classify(handle) == ElementClass::Text)
}
