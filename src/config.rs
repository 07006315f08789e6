//! Configuration loading from TOML files and environment variables.
//!
//! Every field has a default, so an absent file is equivalent to an empty one.
//! The search API key is only ever read from the environment.

use crate::error::Result;
use crate::record::DEFAULT_SOURCE_MARKER;
use crate::search::SearchEndpoint;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the search service API key.
pub const API_KEY_ENV: &str = "DOCSEARCH_API_KEY";
/// Overrides `search.app_id`.
pub const APP_ID_ENV: &str = "DOCSEARCH_APP_ID";
/// Overrides `search.index_name`.
pub const INDEX_ENV: &str = "DOCSEARCH_INDEX";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub indexer: IndexerConfig,
    #[serde(default)]
    pub apidoc: ApiDocSettings,
}

/// Search service connection settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Service root; derived from `app_id` when unset
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub app_id: String,

    #[serde(default = "default_index_name")]
    pub index_name: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Record building settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IndexerConfig {
    /// Nodes whose text contains this are not indexed
    #[serde(default = "default_source_marker")]
    pub source_marker: String,
}

/// External API doc generator
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiDocSettings {
    #[serde(default = "default_apidoc_command")]
    pub command: String,

    /// `{config}` is replaced by the generated configuration path
    #[serde(default = "default_apidoc_args")]
    pub args: Vec<String>,
}

fn default_index_name() -> String {
    "docs".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_source_marker() -> String {
    DEFAULT_SOURCE_MARKER.to_string()
}

fn default_apidoc_command() -> String {
    "apidoc".to_string()
}

fn default_apidoc_args() -> Vec<String> {
    vec!["--config".to_string(), "{config}".to_string()]
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            app_id: String::new(),
            index_name: default_index_name(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            source_marker: default_source_marker(),
        }
    }
}

impl Default for ApiDocSettings {
    fn default() -> Self {
        Self {
            command: default_apidoc_command(),
            args: default_apidoc_args(),
        }
    }
}

impl Config {
    /// Default config file location (`<config dir>/docsearch/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("docsearch").join("config.toml"))
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    /// Loads configuration from `path`, or from the default location when `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    /// Environment overrides are applied in both cases.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read config at {}", path.display()))?;
                Self::from_toml(&content)?
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => {
                    let content = tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("Failed to read config at {}", path.display()))?;
                    Self::from_toml(&content)?
                }
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Applies environment overrides, reading variables through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(app_id) = lookup(APP_ID_ENV).filter(|v| !v.is_empty()) {
            self.search.app_id = app_id;
        }
        if let Some(index) = lookup(INDEX_ENV).filter(|v| !v.is_empty()) {
            self.search.index_name = index;
        }
    }
}

impl SearchConfig {
    /// Resolves connection details, pairing this config with an API key.
    pub fn endpoint(&self, api_key: String) -> Result<SearchEndpoint> {
        anyhow::ensure!(
            !self.app_id.is_empty(),
            "search.app_id is not configured (set it in the config file or {})",
            APP_ID_ENV
        );
        let base_url = self
            .base_url
            .clone()
            .unwrap_or_else(|| format!("https://{}.algolia.net", self.app_id));

        Ok(SearchEndpoint {
            base_url,
            app_id: self.app_id.clone(),
            api_key,
            index_name: self.index_name.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

/// Reads the search API key from the environment.
pub fn api_key_from_env() -> Result<String> {
    std::env::var(API_KEY_ENV).with_context(|| format!("{} is not set", API_KEY_ENV))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use std::collections::HashMap;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        check!(config == Config::default());
        check!(config.indexer.source_marker == DEFAULT_SOURCE_MARKER);
        check!(config.apidoc.args == ["--config", "{config}"]);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml(
            r#"
            [search]
            app_id = "APP"
            index_name = "project-docs"

            [apidoc]
            command = "typedoc"
            "#,
        )
        .unwrap();
        check!(config.search.app_id == "APP");
        check!(config.search.index_name == "project-docs");
        check!(config.search.timeout_secs == 30);
        check!(config.apidoc.command == "typedoc");
        check!(config.apidoc.args == default_apidoc_args());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([(APP_ID_ENV, "ENVAPP"), (INDEX_ENV, "")]);
        let mut config = Config::default();
        config.search.index_name = "from-file".to_string();

        config.apply_env(|name| env.get(name).map(|v| (*v).to_string()));

        check!(config.search.app_id == "ENVAPP");
        // Empty values do not override
        check!(config.search.index_name == "from-file");
    }

    #[test]
    fn test_endpoint_derives_base_url() {
        let config = SearchConfig {
            app_id: "APP".to_string(),
            ..SearchConfig::default()
        };
        let endpoint = config.endpoint("key".to_string()).unwrap();
        check!(endpoint.base_url == "https://APP.algolia.net");
        check!(endpoint.timeout == Duration::from_secs(30));
    }

    #[test]
    fn test_endpoint_requires_app_id() {
        let_assert!(Err(_) = SearchConfig::default().endpoint("key".to_string()));
    }

    #[tokio::test]
    async fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml"))).await;
        check!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[indexer]\nsource_marker = \"@@src\"\n").unwrap();

        let config = Config::load(Some(&path)).await.unwrap();
        check!(config.indexer.source_marker == "@@src");
    }
}
