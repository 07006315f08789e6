//! Documentation trees: the parsed model, rendering, and traversal.

pub mod node;
pub mod render;
pub mod walker;

pub use node::{Document, HeadingLevel, Inline, Node, Value};
pub use render::{render_html, render_text};
pub use walker::{NodeWalker, is_indexable, walk};
