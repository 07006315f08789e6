//! Project and version descriptors supplied by the hosting platform.

use crate::error::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A documentation project as known to the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Full display name
    pub name: String,
    /// Short name shown next to search results
    pub short_name: String,
    /// Slug used to tag records
    pub slug: String,
    /// Slug used in documentation URLs (`/projects/<docs_slug>/...`)
    pub docs_slug: String,
    /// Remote repository identity, `<org>/<repo>`
    pub repository: String,
}

impl Project {
    /// Loads a project descriptor from a TOML file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read project file at {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse project file at {}", path.display()))
    }

    /// Splits the repository identity into `(org, repo)`.
    pub fn repository_parts(&self) -> Option<(&str, &str)> {
        let (org, repo) = self.repository.split_once('/')?;
        if org.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }
        Some((org, repo))
    }
}

/// One published version of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectVersion {
    /// Version slug as it appears in URLs and record ids
    pub slug: String,
    /// Source branch the version is built from
    pub branch: String,
}

impl ProjectVersion {
    pub fn new(slug: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            branch: branch.into(),
        }
    }
}
