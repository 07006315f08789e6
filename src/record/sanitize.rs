//! Markup stripping for record content.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[A-Za-z/!?][^>]*>").expect("tag pattern is valid"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]*);")
        .expect("entity pattern is valid")
});

/// Removes markup tags and character entities, leaving plain text.
///
/// Entities are decoded before tags are stripped, and the two passes repeat until
/// the text stops changing, so escaped markup such as `&lt;div&gt;` never comes
/// back as a tag. Named entities outside the known table are dropped.
pub fn strip_markup(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = {
            let decoded = decode_entities(&current);
            TAG.replace_all(&decoded, "").into_owned()
        };
        if next == current {
            return current;
        }
        // Both passes only ever shrink the text
        current = next;
    }
}

/// Decodes character entities in one pass. Unknown or invalid entities are removed.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    ENTITY.replace_all(text, |caps: &Captures<'_>| {
        decode_entity(&caps[1]).map_or_else(String::new, String::from)
    })
}

fn decode_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(dec) = entity.strip_prefix('#') {
        return dec.parse().ok().and_then(char::from_u32);
    }
    let c = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "hellip" => '…',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "laquo" => '«',
        "raquo" => '»',
        "middot" => '·',
        "bull" => '•',
        "times" => '×',
        "deg" => '°',
        "para" => '¶',
        "sect" => '§',
        _ => return None,
    };
    Some(c)
}
