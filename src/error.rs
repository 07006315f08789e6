//! Error handling types and utilities.

use std::process::ExitStatus;

/// A specialized Result type for docsearch application code.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` at the CLI and configuration edges. Library operations return
/// the typed errors below.
pub type Result<T> = anyhow::Result<T>;

/// A node's value could not be rendered to text or HTML.
///
/// Fatal for the enclosing document: a record is never emitted with a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The value is neither markup, text, nor a scalar that coerces to text.
    #[error("node value of type `{kind}` cannot be rendered as text")]
    UnsupportedValue { kind: &'static str },
    /// Inline markup nested past the render depth limit.
    #[error("inline markup nested deeper than {max} levels")]
    TooDeep { max: usize },
}

/// A call to the search service failed.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("search service request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search service returned {status} for {operation}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },
    #[error("invalid search service configuration: {0}")]
    Config(String),
}

/// Running the external API-doc generator failed.
#[derive(Debug, thiserror::Error)]
pub enum ApiDocError {
    #[error("invalid repository '{0}': expected <org>/<repo>")]
    InvalidRepository(String),
    #[error("failed to write generator configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize generator configuration: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to launch '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("'{command}' exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Indexing a project version failed as a whole.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to build records for '{slug}': {source}")]
    Render { slug: String, source: RenderError },
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error("indexing batch cancelled")]
    Cancelled,
    #[error("record builder task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
