//! The `doc` root.

use serde::Deserialize;
use uuid::Uuid;

use super::iter::DfsIter;
use super::node::{ContainerNode, Node};
use crate::convert::DEFAULT_MAX_DEPTH;
use crate::error::{Error, Result};
use crate::query;

/// An editor document: the ordered top-level nodes under an implicit `doc` root.
///
/// Serializes as `{ "type": "doc", "content": [...] }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub content: Vec<Node>,
}

impl Document {
    pub fn new(content: Vec<Node>) -> Self {
        Self { content }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.content
    }

    /// Every node in document order with its depth.
    pub fn iter(&self) -> DfsIter<'_> {
        DfsIter::new(&self.content)
    }

    /// Total number of nodes below the root.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Concatenated text of all leaves.
    pub fn text_content(&self) -> String {
        self.iter()
            .filter_map(|(node, _)| node.as_text())
            .map(|t| t.text.as_str())
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document nested at most [`DEFAULT_MAX_DEPTH`] nodes deep, the
    /// most a default [`Converter`](crate::Converter) produces.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_with_depth(json, DEFAULT_MAX_DEPTH)
    }

    /// Parse a document nested at most `max_depth` nodes deep.
    ///
    /// serde_json's own recursion limit is replaced by a nesting check over
    /// the raw text, sized so any tree built under the same `max_depth` reads
    /// back.
    pub fn from_json_with_depth(json: &str, max_depth: usize) -> Result<Self> {
        // doc object and content array, then an object and a content array per
        // node level, then a leaf's marks array, mark object and mark attrs.
        let limit = 2 * (max_depth + 2) + 4;
        if json_nesting(json) > limit {
            return Err(Error::DepthLimitExceeded { limit: max_depth });
        }

        let mut de = serde_json::Deserializer::from_str(json);
        de.disable_recursion_limit();
        let doc = Self::deserialize(&mut de)?;
        de.end()?;
        Ok(doc)
    }

    /// Deepest node (text leaves included) whose text contains `target`.
    pub fn find_deepest(&self, target: &str) -> Option<&Node> {
        query::find_deepest(target, &self.content)
    }

    /// Deepest container whose text contains `target`.
    pub fn find_deepest_container(&self, target: &str) -> Option<&ContainerNode> {
        query::find_deepest_container(target, &self.content)
    }

    /// All nodes at the deepest matching level.
    pub fn find_all(&self, target: &str) -> Vec<&Node> {
        query::find_all(target, &self.content)
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<&Node> {
        query::find_by_id(id, &self.content)
    }

    /// Id of the block that holds `text`, for correlating external suggestions
    /// with tree locations.
    pub fn locate(&self, text: &str) -> Option<Uuid> {
        self.find_deepest_container(text).map(|c| c.id)
    }
}

impl From<Vec<Node>> for Document {
    fn from(content: Vec<Node>) -> Self {
        Self::new(content)
    }
}
/// Deepest bracket nesting in `json`, ignoring brackets inside strings.
fn json_nesting(json: &str) -> usize {
    let (mut depth, mut max) = (0usize, 0usize);
    let (mut in_string, mut escaped) = (false, false);
    for b in json.bytes() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                max = max.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeKind, TextNode};

    #[test]
    fn test_json_nesting_skips_strings() {
        assert_eq!(json_nesting("{}"), 1);
        assert_eq!(json_nesting(r#"{"a":[{"b":[]}]}"#), 4);
        assert_eq!(json_nesting(r#"{"text":"[[[{\"]]"}"#), 1);
    }

    #[test]
    fn test_from_json_rejects_excess_nesting() {
        let json = format!(r#"{{"type":"doc","content":{}"#, "[".repeat(5_000));
        let err = Document::from_json_with_depth(&json, 8).unwrap_err();
        assert!(matches!(err, Error::DepthLimitExceeded { limit: 8 }));
    }

    #[test]
    fn test_from_json_accepts_tree_at_limit() {
        let mut node: Node = ContainerNode::new(NodeKind::Paragraph)
            .with_content(vec![TextNode::new("x").into()])
            .into();
        for _ in 0..100 {
            node = ContainerNode::new(NodeKind::BlockQuote)
                .with_content(vec![node])
                .into();
        }
        let doc = Document::new(vec![node]);

        let back = Document::from_json_with_depth(&doc.to_json().unwrap(), 100).unwrap();
        assert_eq!(back, doc);
    }
}
