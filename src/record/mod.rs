//! Search records and the builder that derives them from document trees.

pub mod builder;
pub mod context;
pub mod digest;
pub mod sanitize;

pub use builder::{DEFAULT_SOURCE_MARKER, RecordBuilder, build_records};
pub use context::{HeadingContext, anchor_for_title, find_anchor_id};
pub use digest::ContentDigest;
pub use sanitize::{decode_entities, strip_markup};

use crate::document::{HeadingLevel, Node};
use serde::{Deserialize, Serialize};

/// Rank of paragraph content; lower ranks sort first.
pub const PARAGRAPH_RANK: u8 = 6;

/// Rank of a title or paragraph node, `None` for anything else.
///
/// H1 through H6 map to 0 through 5 and paragraphs to 6.
pub const fn rank_of(node: &Node) -> Option<u8> {
    match node {
        Node::Title { level, .. } => Some(heading_rank(*level)),
        Node::Paragraph { .. } => Some(PARAGRAPH_RANK),
        Node::Other { .. } => None,
    }
}

pub(crate) const fn heading_rank(level: HeadingLevel) -> u8 {
    level.number() - 1
}

/// One entry of the search index.
///
/// Field names follow the search service's record schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub rank: u8,
    pub h1: Option<String>,
    pub h2: Option<String>,
    pub h3: Option<String>,
    pub h4: Option<String>,
    pub h5: Option<String>,
    /// Plain-text body; empty for H1-H5 records
    pub content: String,
    pub url: String,
    #[serde(rename = "projectName")]
    pub project_name: String,
    /// `[version_slug, project_slug]`
    #[serde(rename = "_tags")]
    pub tags: [String; 2],
}
