//! Shared test fixtures and builders for integration tests.
//!
//! # Available Fixtures
//!
//! - `project`: a project descriptor with distinct slug, docs slug and short name
//! - `version`: the `latest` version built from `main`
//!
//! Node builders (`h`, `anchored`, `p`, `section`) keep document literals short.
//! [`TempWorkspace`] provides a temp directory for tests that touch the filesystem.

use docsearch::{Document, HeadingLevel, Inline, Node, Project, ProjectVersion};
use rstest::fixture;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[fixture]
pub fn project() -> Project {
    Project {
        name: "Widget Toolkit".to_string(),
        short_name: "widgets".to_string(),
        slug: "widget-toolkit".to_string(),
        docs_slug: "widget-docs".to_string(),
        repository: "acme/widgets".to_string(),
    }
}

#[fixture]
pub fn version() -> ProjectVersion {
    ProjectVersion::new("latest", "main")
}

fn level(n: u8) -> HeadingLevel {
    HeadingLevel::try_from(n).unwrap_or_else(|e| panic!("{}", e))
}

/// Title without an anchor id.
#[allow(dead_code)] // Builders used across different integration test crates
pub fn h(n: u8, text: &str) -> Node {
    Node::title(level(n), text)
}

/// Title whose HTML carries `<a id="{id}">`.
#[allow(dead_code)]
pub fn anchored(n: u8, id: &str, text: &str) -> Node {
    Node::title(
        level(n),
        vec![Inline::Anchor {
            id: id.to_string(),
            children: vec![Inline::text(text)],
        }],
    )
}

#[allow(dead_code)]
pub fn p(text: &str) -> Node {
    Node::paragraph(text)
}

#[allow(dead_code)]
pub fn section(children: Vec<Node>) -> Node {
    Node::other("section", children)
}

#[allow(dead_code)]
pub fn doc(slug: &str, nodes: Vec<Node>) -> Document {
    Document::new(slug, nodes)
}

/// A temporary directory for test isolation, removed on drop.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)]
impl TempWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a file with the given content; parent directories are created as needed.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
        full_path
    }

    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.root.join(path))
            .unwrap_or_else(|e| panic!("Failed to read file '{}': {}", path, e))
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
