//! Text search over the source element tree.
//!
//! Counterpart of [`crate::query`] for callers that still hold the parsed
//! HTML, for example to highlight a passage in the extracted page markup.

use markup5ever_rcdom::NodeData;

use super::Handle;

/// Texts of every text node below `handle`, in document order.
pub fn element_texts(handle: &Handle) -> Vec<String> {
    let mut texts = Vec::new();
    let mut stack = vec![handle.clone()];
    while let Some(node) = stack.pop() {
        match node.data {
            NodeData::Text { ref contents } => texts.push(contents.borrow().to_string()),
            NodeData::Element { .. } | NodeData::Document => {
                stack.extend(node.children.borrow().iter().rev().cloned());
            }
            _ => {}
        }
    }
    texts
}

/// Find the source node holding `target`.
///
/// The first sibling whose text contains `target` is the match. The search
/// only descends into it when `target` is exactly one of its text nodes; text
/// spanning several nodes resolves to the element that holds them all.
pub fn find_deepest_element(target: &str, nodes: &[Handle]) -> Option<Handle> {
    if target.is_empty() {
        return None;
    }

    let mut level = nodes.to_vec();
    loop {
        let node = level
            .iter()
            .find(|node| element_texts(node).concat().contains(target))?
            .clone();
        let exact = element_texts(&node).iter().any(|t| t == target);
        if !exact || matches!(node.data, NodeData::Text { .. }) {
            return Some(node);
        }
        level = node.children.borrow().clone();
    }
}
