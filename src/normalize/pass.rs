//! Tree traversal utilities for normalization passes.

use crate::model::Node;

/// What a pass does with one node after its content has been rewritten.
#[derive(Debug)]
pub enum Rewrite {
    /// Keep the node at its position.
    Keep(Node),
    /// Replace the node by these nodes, in order.
    Splice(Vec<Node>),
    /// Remove the node.
    Drop,
}

/// Rewrite a forest bottom-up.
///
/// Each container's content is rewritten before the container itself is
/// visited, so a visitor always sees fully rewritten children and splices
/// cascade upward in a single walk.
pub fn rewrite_bottom_up<F>(nodes: Vec<Node>, visitor: &mut F) -> Vec<Node>
where
    F: FnMut(Node) -> Rewrite,
{
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        let node = match node {
            Node::Container(mut c) => {
                c.content = rewrite_bottom_up(std::mem::take(&mut c.content), visitor);
                Node::Container(c)
            }
            text => text,
        };
        match visitor(node) {
            Rewrite::Keep(node) => out.push(node),
            Rewrite::Splice(nodes) => out.extend(nodes),
            Rewrite::Drop => {}
        }
    }
    out
}
