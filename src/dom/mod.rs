//! Source HTML tree.
//!
//! The converter reads an `RcDom` produced by html5ever. This module wraps the
//! handful of node accessors the converter needs, plus the element-level
//! lookups (kind classification, mark extraction, text search) that operate on
//! source elements rather than on the editor tree.

mod kind_map;
mod marks;
mod query;

pub use kind_map::{class_for_name, classify, is_inline, ElementClass};
pub use marks::{mark_for, marks_for};
pub use markup5ever_rcdom::{Handle, RcDom};
pub use query::{element_texts, find_deepest_element};

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::NodeData;

/// Parse an HTML document or fragment.
///
/// html5ever synthesizes `html`, `head` and `body` as needed, so fragments and
/// full documents both end up with their content under `body`.
pub fn parse_html(html: &str) -> RcDom {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };

    parse_document(RcDom::default(), opts)
        .from_utf8()
        .one(html.as_bytes())
}

/// Children of the `body` element, in document order.
pub fn body_children(dom: &RcDom) -> Vec<Handle> {
    find_first_element(&dom.document, "body")
        .map(|body| body.children.borrow().clone())
        .unwrap_or_default()
}

/// Get the first element with the given local name (depth first, self included).
pub fn find_first_element(handle: &Handle, name: &str) -> Option<Handle> {
    let mut stack = vec![handle.clone()];
    while let Some(node) = stack.pop() {
        if local_name(&node) == Some(name) {
            return Some(node);
        }
        stack.extend(node.children.borrow().iter().rev().cloned());
    }
    None
}

/// Local tag name of an element, `None` for any other node type.
pub fn local_name(handle: &Handle) -> Option<&str> {
    match handle.data {
        NodeData::Element { ref name, .. } => Some(&*name.local),
        _ => None,
    }
}

pub fn is_element(handle: &Handle) -> bool {
    matches!(handle.data, NodeData::Element { .. })
}

pub fn is_text(handle: &Handle) -> bool {
    matches!(handle.data, NodeData::Text { .. })
}

/// Literal contents of a text node.
pub fn text_of(handle: &Handle) -> Option<String> {
    match handle.data {
        NodeData::Text { ref contents } => Some(contents.borrow().to_string()),
        _ => None,
    }
}

/// Get text content from a node (ignoring tags)
pub fn text_content(handle: &Handle) -> String {
    let mut text = String::new();
    let mut stack = vec![handle.clone()];
    while let Some(node) = stack.pop() {
        match node.data {
            NodeData::Text { ref contents } => text.push_str(&contents.borrow()),
            NodeData::Element { .. } => {
                stack.extend(node.children.borrow().iter().rev().cloned());
            }
            _ => {}
        }
    }
    text
}

/// Get an attribute value from an element
pub fn attribute(handle: &Handle, attr_name: &str) -> Option<String> {
    if let NodeData::Element { ref attrs, .. } = handle.data {
        for attr in attrs.borrow().iter() {
            if attr.name.local.as_ref() == attr_name {
                return Some(attr.value.to_string());
            }
        }
    }
    None
}

/// Whitespace-separated tokens of the `class` attribute.
pub fn class_tokens(handle: &Handle) -> Vec<String> {
    attribute(handle, "class")
        .map(|class| class.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}
