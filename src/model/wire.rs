//! JSON wire format for nodes and documents.
//!
//! On the wire the node id sits inside `attrs`, next to the kind attributes:
//!
//! ```json
//! { "type": "heading", "attrs": { "id": "…", "level": 2 }, "content": [], "marks": [] }
//! { "type": "text", "attrs": { "id": "…" }, "text": "Title", "marks": [] }
//! ```

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::document::Document;
use super::mark::Mark;
use super::node::{Attrs, ContainerNode, Node, NodeKind, TextNode};
use crate::error::Error;

#[derive(Serialize)]
struct TextAttrsOut {
    id: Uuid,
}

#[derive(Serialize)]
struct ContainerAttrsOut<'a> {
    id: Uuid,
    #[serde(flatten)]
    attrs: &'a Attrs,
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        match self {
            Node::Text(t) => {
                map.serialize_entry("type", "text")?;
                map.serialize_entry("attrs", &TextAttrsOut { id: t.id })?;
                map.serialize_entry("text", &t.text)?;
                map.serialize_entry("marks", &t.marks)?;
            }
            Node::Container(c) => {
                map.serialize_entry("type", c.kind.as_str())?;
                map.serialize_entry(
                    "attrs",
                    &ContainerAttrsOut {
                        id: c.id,
                        attrs: &c.attrs,
                    },
                )?;
                map.serialize_entry("content", &c.content)?;
                map.serialize_entry("marks", &c.marks)?;
            }
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct WireNode {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    attrs: Map<String, Value>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    content: Vec<WireNode>,
    #[serde(default)]
    marks: Vec<Mark>,
}

impl TryFrom<WireNode> for Node {
    type Error = Error;

    fn try_from(wire: WireNode) -> Result<Self, Self::Error> {
        let mut attrs = wire.attrs;
        let id = match attrs.remove("id") {
            Some(Value::String(s)) => Uuid::parse_str(&s)
                .map_err(|e| Error::InvalidNode(format!("bad id '{s}': {e}")))?,
            Some(other) => return Err(Error::InvalidNode(format!("bad id {other}"))),
            None => Uuid::new_v4(),
        };

        if wire.kind == "text" {
            if !wire.content.is_empty() {
                return Err(Error::InvalidNode("text node with content".to_string()));
            }
            return Ok(Node::Text(TextNode {
                id,
                text: wire.text.unwrap_or_default(),
                marks: wire.marks,
            }));
        }

        let kind: NodeKind = wire.kind.parse().map_err(Error::InvalidNode)?;
        let attrs: Attrs = serde_json::from_value(Value::Object(attrs))
            .map_err(|e| Error::InvalidNode(format!("bad {kind} attrs: {e}")))?;
        let content = wire
            .content
            .into_iter()
            .map(Node::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Node::Container(ContainerNode {
            kind,
            id,
            attrs,
            content,
            marks: wire.marks,
        }))
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireNode::deserialize(deserializer)?;
        Node::try_from(wire).map_err(D::Error::custom)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", NodeKind::Doc.as_str())?;
        map.serialize_entry("content", &self.content)?;
        map.end()
    }
}

#[derive(Deserialize)]
struct WireDocument {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<Node>,
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireDocument::deserialize(deserializer)?;
        if wire.kind != NodeKind::Doc.as_str() {
            return Err(D::Error::custom(format!(
                "expected a 'doc' root, found '{}'",
                wire.kind
            )));
        }
        Ok(Document::new(wire.content))
    }
}
