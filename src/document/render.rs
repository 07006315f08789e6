//! Text and HTML rendering of node values.

use super::node::{Inline, Node, Value};
use crate::error::RenderError;
use std::fmt::Write;

/// Maximum inline nesting depth before a value is treated as malformed.
pub const MAX_INLINE_DEPTH: usize = 64;

/// Renders a value to plain text.
///
/// Markup is flattened recursively, text is used as-is and numbers or booleans
/// are coerced. Raw HTML fragments are kept verbatim; stripping is the caller's
/// concern.
pub fn render_text(value: &Value) -> Result<String, RenderError> {
    let mut out = String::new();
    match value {
        Value::Text(text) => out.push_str(text),
        Value::Markup(inlines) => text_into(&mut out, inlines, 0)?,
        Value::Scalar(scalar) => out.push_str(&coerce_scalar(scalar)?),
    }
    Ok(out)
}

/// Renders a title or paragraph to its HTML form, including anchor markup.
///
/// Other nodes render their children in order.
pub fn render_html(node: &Node) -> Result<String, RenderError> {
    let mut out = String::new();
    html_node_into(&mut out, node, 0)?;
    Ok(out)
}

fn html_node_into(out: &mut String, node: &Node, depth: usize) -> Result<(), RenderError> {
    check_depth(depth)?;
    match node {
        Node::Title { level, value } => {
            let n = level.number();
            let _ = write!(out, "<h{}>", n);
            html_value_into(out, value)?;
            let _ = write!(out, "</h{}>", n);
        }
        Node::Paragraph { value } => {
            out.push_str("<p>");
            html_value_into(out, value)?;
            out.push_str("</p>");
        }
        Node::Other { children, .. } => {
            for child in children {
                html_node_into(out, child, depth + 1)?;
            }
        }
    }
    Ok(())
}

fn html_value_into(out: &mut String, value: &Value) -> Result<(), RenderError> {
    match value {
        Value::Text(text) => escape_into(out, text),
        Value::Markup(inlines) => html_inlines_into(out, inlines, 0)?,
        Value::Scalar(scalar) => escape_into(out, &coerce_scalar(scalar)?),
    }
    Ok(())
}

fn text_into(out: &mut String, inlines: &[Inline], depth: usize) -> Result<(), RenderError> {
    check_depth(depth)?;
    for inline in inlines {
        match inline {
            Inline::Text { text } | Inline::Literal { text } => out.push_str(text),
            Inline::Raw { html } => out.push_str(html),
            Inline::Emphasis { children }
            | Inline::Strong { children }
            | Inline::Link { children, .. }
            | Inline::Anchor { children, .. } => text_into(out, children, depth + 1)?,
        }
    }
    Ok(())
}

fn html_inlines_into(
    out: &mut String,
    inlines: &[Inline],
    depth: usize,
) -> Result<(), RenderError> {
    check_depth(depth)?;
    for inline in inlines {
        match inline {
            Inline::Text { text } => escape_into(out, text),
            Inline::Literal { text } => {
                out.push_str("<code>");
                escape_into(out, text);
                out.push_str("</code>");
            }
            Inline::Raw { html } => out.push_str(html),
            Inline::Emphasis { children } => {
                out.push_str("<em>");
                html_inlines_into(out, children, depth + 1)?;
                out.push_str("</em>");
            }
            Inline::Strong { children } => {
                out.push_str("<strong>");
                html_inlines_into(out, children, depth + 1)?;
                out.push_str("</strong>");
            }
            Inline::Link { href, children } => {
                out.push_str("<a href=\"");
                escape_into(out, href);
                out.push_str("\">");
                html_inlines_into(out, children, depth + 1)?;
                out.push_str("</a>");
            }
            Inline::Anchor { id, children } => {
                out.push_str("<a id=\"");
                escape_into(out, id);
                out.push_str("\">");
                html_inlines_into(out, children, depth + 1)?;
                out.push_str("</a>");
            }
        }
    }
    Ok(())
}

fn coerce_scalar(scalar: &serde_json::Value) -> Result<String, RenderError> {
    match scalar {
        serde_json::Value::String(text) => Ok(text.clone()),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        serde_json::Value::Bool(flag) => Ok(flag.to_string()),
        serde_json::Value::Null => Err(RenderError::UnsupportedValue { kind: "null" }),
        serde_json::Value::Array(_) => Err(RenderError::UnsupportedValue { kind: "array" }),
        serde_json::Value::Object(_) => Err(RenderError::UnsupportedValue { kind: "object" }),
    }
}

const fn check_depth(depth: usize) -> Result<(), RenderError> {
    if depth > MAX_INLINE_DEPTH {
        return Err(RenderError::TooDeep {
            max: MAX_INLINE_DEPTH,
        });
    }
    Ok(())
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
