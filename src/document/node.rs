//! Parsed documentation trees as emitted by the renderer.
//!
//! Documents arrive as JSON. Nodes carry a `kind` discriminator; `title` and
//! `paragraph` are understood directly and every other kind becomes a
//! [`Node::Other`] container whose children are still walked.

use crate::error::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One rendered page of a project version.
///
/// Other page-level fields the renderer attaches are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Page path relative to the version root, without extension
    pub slug: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn new(slug: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            slug: slug.into(),
            nodes,
        }
    }

    /// Loads a document tree from a JSON file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read document at {}", path.display()))?;
        serde_json::from_slice(&content)
            .with_context(|| format!("Failed to parse document JSON at {}", path.display()))
    }
}

/// Heading depth of a title node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Numeric level, 1 through 6.
    pub const fn number(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
            Self::H5 => 5,
            Self::H6 => 6,
        }
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(level: u8) -> std::result::Result<Self, Self::Error> {
        match level {
            1 => Ok(Self::H1),
            2 => Ok(Self::H2),
            3 => Ok(Self::H3),
            4 => Ok(Self::H4),
            5 => Ok(Self::H5),
            6 => Ok(Self::H6),
            other => Err(format!("heading level must be 1-6, got {}", other)),
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.number()
    }
}

/// A block-level node of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub enum Node {
    Title { level: HeadingLevel, value: Value },
    Paragraph { value: Value },
    /// Any other block (section, list, admonition, ...). Only these nest.
    Other { tag: String, children: Vec<Node> },
}

impl Node {
    pub fn title(level: HeadingLevel, value: impl Into<Value>) -> Self {
        Self::Title {
            level,
            value: value.into(),
        }
    }

    pub fn paragraph(value: impl Into<Value>) -> Self {
        Self::Paragraph {
            value: value.into(),
        }
    }

    pub fn other(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Other {
            tag: tag.into(),
            children,
        }
    }

    /// Block children of this node; empty for titles and paragraphs.
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Other { children, .. } => children,
            Self::Title { .. } | Self::Paragraph { .. } => &[],
        }
    }
}

/// The renderable value of a title or paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Markup(Vec<Inline>),
    /// Anything else the renderer emitted. Numbers and booleans coerce to text.
    Scalar(serde_json::Value),
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<Inline>> for Value {
    fn from(markup: Vec<Inline>) -> Self {
        Self::Markup(markup)
    }
}

/// Inline markup inside a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    Text {
        text: String,
    },
    Emphasis {
        children: Vec<Inline>,
    },
    Strong {
        children: Vec<Inline>,
    },
    Literal {
        text: String,
    },
    Link {
        href: String,
        children: Vec<Inline>,
    },
    /// In-page link target; rendered as `<a id="...">`.
    Anchor {
        id: String,
        #[serde(default)]
        children: Vec<Inline>,
    },
    /// Pre-rendered HTML passed through untouched.
    Raw {
        html: String,
    },
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// Wire shape of a node before kind dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawNode {
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    level: Option<HeadingLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<RawNode>,
}

impl TryFrom<RawNode> for Node {
    type Error = String;

    fn try_from(raw: RawNode) -> std::result::Result<Self, Self::Error> {
        match raw.kind.as_str() {
            "title" => Ok(Self::Title {
                level: raw.level.ok_or("title node is missing `level`")?,
                value: raw.value.ok_or("title node is missing `value`")?,
            }),
            "paragraph" => Ok(Self::Paragraph {
                value: raw.value.ok_or("paragraph node is missing `value`")?,
            }),
            _ => Ok(Self::Other {
                tag: raw.kind,
                children: raw
                    .children
                    .into_iter()
                    .map(Node::try_from)
                    .collect::<std::result::Result<_, _>>()?,
            }),
        }
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        match node {
            Node::Title { level, value } => Self {
                kind: "title".to_string(),
                level: Some(level),
                value: Some(value),
                children: Vec::new(),
            },
            Node::Paragraph { value } => Self {
                kind: "paragraph".to_string(),
                level: None,
                value: Some(value),
                children: Vec::new(),
            },
            Node::Other { tag, children } => Self {
                kind: tag,
                level: None,
                value: None,
                children: children.into_iter().map(Self::from).collect(),
            },
        }
    }
}
