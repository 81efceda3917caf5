//! Splice `skip` wrappers into their parent.

use super::pass::{rewrite_bottom_up, Rewrite};
use crate::model::{Node, NodeKind};

/// Replace every `skip` container by its content at the same position.
///
/// Content is flattened first, so nested skips vanish in one walk.
pub fn flatten(nodes: Vec<Node>) -> Vec<Node> {
    rewrite_bottom_up(nodes, &mut flatten_skip)
}

pub(super) fn flatten_skip(node: Node) -> Rewrite {
    match node {
        Node::Container(c) if c.kind == NodeKind::Skip => Rewrite::Splice(c.content),
        other => Rewrite::Keep(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DfsIter;

    #[test]
    fn test_nested_skips_flatten_in_place() {
        let nodes = vec![
            Node::container(NodeKind::Paragraph, vec![Node::text("first")]),
            Node::container(
                NodeKind::Skip,
                vec![
                    Node::container(
                        NodeKind::Skip,
                        vec![Node::container(NodeKind::Paragraph, vec![Node::text("X")])],
                    ),
                    Node::container(NodeKind::Paragraph, vec![Node::text("Y")]),
                ],
            ),
            Node::container(NodeKind::Paragraph, vec![Node::text("last")]),
        ];

        let out = flatten(nodes);

        let texts: Vec<_> = out.iter().map(|n| n.text_content()).collect();
        assert_eq!(texts, vec!["first", "X", "Y", "last"]);
        assert!(out.iter().all(|n| n.kind() == Some(NodeKind::Paragraph)));
    }

    #[test]
    fn test_skip_inside_container_is_removed() {
        let nodes = vec![Node::container(
            NodeKind::BulletList,
            vec![Node::container(
                NodeKind::Skip,
                vec![Node::container(NodeKind::ListItem, vec![])],
            )],
        )];

        let out = flatten(nodes);

        assert!(DfsIter::new(&out).all(|(n, _)| n.kind() != Some(NodeKind::Skip)));
        assert_eq!(out[0].content()[0].kind(), Some(NodeKind::ListItem));
    }

    #[test]
    fn test_empty_skip_disappears() {
        let out = flatten(vec![Node::container(NodeKind::Skip, vec![])]);
        assert!(out.is_empty());
    }
}
