//! Running heading breadcrumb and anchor state for one document.

use super::sanitize::decode_entities;
use crate::document::HeadingLevel;
use regex::Regex;
use std::sync::LazyLock;

/// First `<a id="...">...</a>` in a title's HTML. An empty id still matches here
/// and is rejected by [`find_anchor_id`].
static ANCHOR_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a id="([^"]*)">.*?</a>"#).expect("anchor pattern is valid")
});

/// Number of heading levels tracked as breadcrumb context (H1-H5).
pub const TRACKED_LEVELS: usize = 5;

/// Most recently seen heading text at each of levels 1-5.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingContext {
    slots: [Option<String>; TRACKED_LEVELS],
}

impl HeadingContext {
    /// Records a heading.
    ///
    /// Sets the slot for `level`, clears every deeper slot and leaves shallower
    /// ones alone. Returns `false` for H6, which is never tracked.
    pub fn observe(&mut self, level: HeadingLevel, text: String) -> bool {
        let Some(index) = Self::slot_index(level) else {
            return false;
        };
        self.slots[index] = Some(text);
        for slot in &mut self.slots[index + 1..] {
            *slot = None;
        }
        true
    }

    /// Heading text at `level`, if one is active.
    pub fn get(&self, level: HeadingLevel) -> Option<&str> {
        Self::slot_index(level).and_then(|index| self.slots[index].as_deref())
    }

    pub fn slots(&self) -> &[Option<String>; TRACKED_LEVELS] {
        &self.slots
    }

    const fn slot_index(level: HeadingLevel) -> Option<usize> {
        match level {
            HeadingLevel::H1 => Some(0),
            HeadingLevel::H2 => Some(1),
            HeadingLevel::H3 => Some(2),
            HeadingLevel::H4 => Some(3),
            HeadingLevel::H5 => Some(4),
            HeadingLevel::H6 => None,
        }
    }
}

/// Extracts the in-page anchor id from a title's rendered HTML.
///
/// The id is unescaped, so `a&amp;b` in the markup yields `a&b`. Only the first
/// anchor is considered; if its id is empty the title has no usable id.
pub fn find_anchor_id(html: &str) -> Option<String> {
    let id = ANCHOR_ID.captures(html)?.get(1)?.as_str();
    let id = decode_entities(id);
    (!id.is_empty()).then(|| id.into_owned())
}

/// Anchor to attribute to content following a title.
///
/// A title without a detectable id resets the anchor to the bare page slug; the
/// previous fragment is not kept.
pub fn anchor_for_title(slug: &str, html: &str) -> String {
    match find_anchor_id(html) {
        Some(id) => format!("{}.html#{}", slug, id),
        None => {
            tracing::trace!(slug, "title has no anchor id, falling back to page url");
            slug.to_string()
        }
    }
}
