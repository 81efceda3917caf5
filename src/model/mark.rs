//! Formatting marks.

use serde::{Deserialize, Serialize};

/// Formatting annotation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkType {
    Bold,
    Italic,
    Superscript,
    Color,
    Strikethrough,
    Link,
}

impl MarkType {
    pub fn as_str(self) -> &'static str {
        match self {
            MarkType::Bold => "bold",
            MarkType::Italic => "italic",
            MarkType::Superscript => "superscript",
            MarkType::Color => "color",
            MarkType::Strikethrough => "strikethrough",
            MarkType::Link => "link",
        }
    }
}

/// Mark attributes. Only links (`href`) and colors (`color`) carry any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A formatting mark on a text leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub mark_type: MarkType,
    #[serde(default)]
    pub attrs: MarkAttrs,
}

impl Mark {
    pub fn new(mark_type: MarkType) -> Self {
        Self {
            mark_type,
            attrs: MarkAttrs::default(),
        }
    }

    pub fn bold() -> Self {
        Self::new(MarkType::Bold)
    }

    pub fn italic() -> Self {
        Self::new(MarkType::Italic)
    }

    pub fn superscript() -> Self {
        Self::new(MarkType::Superscript)
    }

    /// Link mark. An absent target is the empty string, never `None`.
    pub fn link(href: impl Into<String>) -> Self {
        Self {
            mark_type: MarkType::Link,
            attrs: MarkAttrs {
                href: Some(href.into()),
                color: None,
            },
        }
    }

    pub fn href(&self) -> Option<&str> {
        self.attrs.href.as_deref()
    }
}
