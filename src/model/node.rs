//! Node types and kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::mark::Mark;

/// Kind of a container node in the editor schema.
///
/// `text` is deliberately absent: text leaves are the [`Node::Text`] variant and
/// can never hold children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// Display formula. `formula` attr, always empty content.
    Math,
    /// Block of inline content.
    Paragraph,
    /// Headings with a `level` attr (1-4).
    Heading,
    ListItem,
    BulletList,
    /// Document root. Only produced by [`crate::Document`] serialization.
    Doc,
    /// Preformatted code with a `language` attr.
    CodeBlock,
    BlockQuote,
    TableRow,
    TableHeader,
    TableCell,
    Table,
    /// Raster image. `src`/`alt` attrs when the source element had them.
    Image,
    /// Legacy link node. Links are normally a mark on text.
    Link,
    /// Structurally irrelevant wrapper. Removed by normalization.
    Skip,
}

impl NodeKind {
    /// The editor schema name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Math => "math",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::ListItem => "listItem",
            NodeKind::BulletList => "bulletList",
            NodeKind::Doc => "doc",
            NodeKind::CodeBlock => "codeBlock",
            NodeKind::BlockQuote => "blockQuote",
            NodeKind::TableRow => "tableRow",
            NodeKind::TableHeader => "tableHeader",
            NodeKind::TableCell => "tableCell",
            NodeKind::Table => "table",
            NodeKind::Image => "image",
            NodeKind::Link => "link",
            NodeKind::Skip => "skip",
        }
    }

    /// Kinds whose content is inline leaves rather than blocks.
    pub fn holds_inline_content(self) -> bool {
        matches!(self, NodeKind::Heading | NodeKind::CodeBlock)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "math" => NodeKind::Math,
            "paragraph" => NodeKind::Paragraph,
            "heading" => NodeKind::Heading,
            "listItem" => NodeKind::ListItem,
            "bulletList" => NodeKind::BulletList,
            "doc" => NodeKind::Doc,
            "codeBlock" => NodeKind::CodeBlock,
            "blockQuote" => NodeKind::BlockQuote,
            "tableRow" => NodeKind::TableRow,
            "tableHeader" => NodeKind::TableHeader,
            "tableCell" => NodeKind::TableCell,
            "table" => NodeKind::Table,
            "image" => NodeKind::Image,
            "link" => NodeKind::Link,
            "skip" => NodeKind::Skip,
            other => return Err(format!("unknown node type '{other}'")),
        })
    }
}

/// Kind-specific attributes of a container node.
///
/// The node id lives on the node itself; it is merged into the `attrs` object
/// only on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Attributes this crate does not interpret, kept for round trips.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attrs {
    pub fn is_empty(&self) -> bool {
        *self == Attrs::default()
    }
}

/// A text leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub id: Uuid,
    pub text: String,
    pub marks: Vec<Mark>,
}

impl TextNode {
    /// Create an unmarked text leaf with a fresh id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn with_marks(mut self, marks: Vec<Mark>) -> Self {
        self.marks = marks;
        self
    }

    pub fn has_mark(&self, mark_type: super::MarkType) -> bool {
        self.marks.iter().any(|m| m.mark_type == mark_type)
    }
}

/// A node with a kind, attributes and child content.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerNode {
    pub kind: NodeKind,
    pub id: Uuid,
    pub attrs: Attrs,
    pub content: Vec<Node>,
    pub marks: Vec<Mark>,
}

impl ContainerNode {
    /// Create an empty container with a fresh id.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            id: Uuid::new_v4(),
            attrs: Attrs::default(),
            content: Vec::new(),
            marks: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: Vec<Node>) -> Self {
        self.content = content;
        self
    }

    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }
}

/// A node in the editor tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(TextNode),
    Container(ContainerNode),
}

impl Node {
    /// Shorthand for an unmarked text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextNode::new(text))
    }

    /// Shorthand for a container of `kind` holding `content`.
    pub fn container(kind: NodeKind, content: Vec<Node>) -> Self {
        Node::Container(ContainerNode::new(kind).with_content(content))
    }

    pub fn id(&self) -> Uuid {
        match self {
            Node::Text(t) => t.id,
            Node::Container(c) => c.id,
        }
    }

    /// Container kind, or `None` for text leaves.
    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            Node::Text(_) => None,
            Node::Container(c) => Some(c.kind),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            Node::Text(t) => Some(t),
            Node::Container(_) => None,
        }
    }

    pub fn as_container(&self) -> Option<&ContainerNode> {
        match self {
            Node::Text(_) => None,
            Node::Container(c) => Some(c),
        }
    }

    /// Child content (always empty for text leaves).
    pub fn content(&self) -> &[Node] {
        match self {
            Node::Text(_) => &[],
            Node::Container(c) => &c.content,
        }
    }

    pub fn marks(&self) -> &[Mark] {
        match self {
            Node::Text(t) => &t.marks,
            Node::Container(c) => &c.marks,
        }
    }

    /// Leaf texts in document order.
    pub fn leaf_texts(&self) -> Vec<&str> {
        let mut texts = Vec::new();
        collect_leaf_texts(self, &mut texts);
        texts
    }

    /// Concatenated text of every leaf below this node.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.text.clone(),
            Node::Container(_) => self.leaf_texts().concat(),
        }
    }
}

fn collect_leaf_texts<'a>(node: &'a Node, texts: &mut Vec<&'a str>) {
    match node {
        Node::Text(t) => texts.push(&t.text),
        Node::Container(c) => {
            for child in &c.content {
                collect_leaf_texts(child, texts);
            }
        }
    }
}

impl From<TextNode> for Node {
    fn from(node: TextNode) -> Self {
        Node::Text(node)
    }
}

impl From<ContainerNode> for Node {
    fn from(node: ContainerNode) -> Self {
        Node::Container(node)
    }
}
