//! Text search over a converted tree.
//!
//! Used to map free text (for example the quoted passage of an externally
//! generated suggestion) back onto tree nodes. The search is a linear
//! depth-first scan; documents are single reports, not corpora, so no index
//! is built.
//!
//! A node *matches* when `target` occurs in the concatenation of its leaf
//! texts. A match on a container is refined by searching its content: the
//! deepest match wins. Text that spans two leaves therefore resolves to the
//! container holding both.
//!
//! An empty target never matches.

use uuid::Uuid;

use crate::model::{ContainerNode, DfsIter, Node};

fn contains_text(node: &Node, target: &str) -> bool {
    match node {
        Node::Text(t) => t.text.contains(target),
        Node::Container(_) => node.leaf_texts().concat().contains(target),
    }
}

/// Find the deepest node whose text contains `target`.
///
/// Siblings are tried in order and the first match is refined; text leaves
/// that match are returned themselves.
pub fn find_deepest<'a>(target: &str, nodes: &'a [Node]) -> Option<&'a Node> {
    if target.is_empty() {
        return None;
    }
    deepest(target, nodes)
}

fn deepest<'a>(target: &str, nodes: &'a [Node]) -> Option<&'a Node> {
    let node = nodes.iter().find(|n| contains_text(n, target))?;
    match node {
        Node::Text(_) => Some(node),
        Node::Container(c) => deepest(target, &c.content).or(Some(node)),
    }
}

/// Like [`find_deepest`] but only containers are candidates.
///
/// This is the granularity editors address nodes at: a suggestion quoting part
/// of a paragraph maps to the paragraph, not to one of its text runs.
pub fn find_deepest_container<'a>(target: &str, nodes: &'a [Node]) -> Option<&'a ContainerNode> {
    if target.is_empty() {
        return None;
    }
    deepest_container(target, nodes)
}

fn deepest_container<'a>(target: &str, nodes: &'a [Node]) -> Option<&'a ContainerNode> {
    for node in nodes {
        if let Node::Container(c) = node
            && contains_text(node, target)
        {
            return deepest_container(target, &c.content).or(Some(c));
        }
    }
    None
}

/// Every node at the deepest matching level, in document order.
///
/// Unlike [`find_deepest`] this does not stop at the first matching sibling,
/// so repeated phrases yield one node per occurrence.
pub fn find_all<'a>(target: &str, nodes: &'a [Node]) -> Vec<&'a Node> {
    let mut found = Vec::new();
    if !target.is_empty() {
        collect_all(target, nodes, &mut found);
    }
    found
}

fn collect_all<'a>(target: &str, nodes: &'a [Node], found: &mut Vec<&'a Node>) {
    for node in nodes.iter().filter(|n| contains_text(n, target)) {
        match node {
            Node::Text(_) => found.push(node),
            Node::Container(c) => {
                let before = found.len();
                collect_all(target, &c.content, found);
                if found.len() == before {
                    found.push(node);
                }
            }
        }
    }
}

/// Find a node by id anywhere in the forest.
pub fn find_by_id(id: Uuid, nodes: &[Node]) -> Option<&Node> {
    DfsIter::new(nodes).map(|(n, _)| n).find(|n| n.id() == id)
}
