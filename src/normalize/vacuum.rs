//! Drop empty text leaves.

use super::pass::{rewrite_bottom_up, Rewrite};
use crate::model::Node;

/// Remove text leaves whose text is literally empty.
///
/// Whitespace is content here: `" "` survives. Structural whitespace between
/// blocks is dealt with while grouping inline runs.
pub fn vacuum(nodes: Vec<Node>) -> Vec<Node> {
    rewrite_bottom_up(nodes, &mut drop_empty_text)
}

pub(super) fn drop_empty_text(node: Node) -> Rewrite {
    match node {
        Node::Text(t) if t.text.is_empty() => Rewrite::Drop,
        other => Rewrite::Keep(other),
    }
}
