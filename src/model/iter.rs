//! Depth-first traversal over a node forest.

use super::node::Node;

/// Pre-order iterator over a node forest, paired with each node's depth
/// (top-level nodes are depth 0).
pub struct DfsIter<'a> {
    stack: Vec<(&'a Node, usize)>,
}

impl<'a> DfsIter<'a> {
    pub fn new(nodes: &'a [Node]) -> Self {
        Self {
            stack: nodes.iter().rev().map(|n| (n, 0)).collect(),
        }
    }
}

impl<'a> Iterator for DfsIter<'a> {
    type Item = (&'a Node, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        self.stack
            .extend(node.content().iter().rev().map(|child| (child, depth + 1)));
        Some((node, depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeKind;

    #[test]
    fn test_preorder_with_depths() {
        let nodes = vec![
            Node::container(
                NodeKind::BulletList,
                vec![Node::container(NodeKind::ListItem, vec![Node::text("a")])],
            ),
            Node::text("b"),
        ];

        let visited: Vec<_> = DfsIter::new(&nodes)
            .map(|(n, depth)| (n.kind().map(|k| k.as_str()).unwrap_or("text"), depth))
            .collect();

        assert_eq!(
            visited,
            vec![("bulletList", 0), ("listItem", 1), ("text", 2), ("text", 0)]
        );
    }
}
