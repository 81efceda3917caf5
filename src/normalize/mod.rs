//! Tree normalization.
//!
//! Runs after building and before the tree leaves the converter. The result
//! contains no `skip` containers and no empty text leaves; sibling order is
//! preserved. Normalizing a normalized tree is a no-op.
//!
//! ## Passes
//!
//! 1. **Flatten** - Splice `skip` wrappers into their parent
//! 2. **Vacuum** - Drop literally empty text leaves
//!
//! Both run in the same bottom-up walk.

mod flatten;
mod pass;
mod vacuum;

pub use flatten::flatten;
pub use pass::{rewrite_bottom_up, Rewrite};
pub use vacuum::vacuum;

use crate::model::Node;

/// Normalize a converted forest.
pub fn normalize(nodes: Vec<Node>) -> Vec<Node> {
    rewrite_bottom_up(nodes, &mut |node| match flatten::flatten_skip(node) {
        Rewrite::Keep(node) => vacuum::drop_empty_text(node),
        other => other,
    })
}
