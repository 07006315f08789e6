//! API reference generation through an external generator process.
//!
//! The generator reads a JSON configuration from a temporary file whose path is
//! substituted into its arguments. The file is removed once the process exits,
//! whether it succeeded, failed, or never started.

use crate::error::ApiDocError;
use crate::types::{Project, ProjectVersion};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Placeholder in generator arguments replaced by the configuration file path.
pub const CONFIG_PLACEHOLDER: &str = "{config}";

/// Configuration handed to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiDocConfig {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub cache_dir: PathBuf,
    /// Remote repository identity, `<org>/<repo>`
    pub repository: String,
    /// Local checkout of the repository
    pub repository_path: PathBuf,
    /// Version or branch being documented
    pub version: String,
}

impl ApiDocConfig {
    /// Builds the generator configuration for one project version.
    pub fn for_version(
        project: &Project,
        version: &ProjectVersion,
        repository_path: impl Into<PathBuf>,
        source_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        cache_dir: impl Into<PathBuf>,
    ) -> Result<Self, ApiDocError> {
        let Some((org, repo)) = project.repository_parts() else {
            return Err(ApiDocError::InvalidRepository(project.repository.clone()));
        };
        Ok(Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            cache_dir: cache_dir.into(),
            repository: format!("{}/{}", org, repo),
            repository_path: repository_path.into(),
            version: version.branch.clone(),
        })
    }
}

/// A configured generator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDocBuild {
    command: String,
    args: Vec<String>,
}

impl ApiDocBuild {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// Runs the generator once and waits for it to exit.
    pub async fn run(&self, config: &ApiDocConfig) -> Result<(), ApiDocError> {
        let mut file = tempfile::Builder::new()
            .prefix("apidoc-")
            .suffix(".json")
            .tempfile()?;
        serde_json::to_writer_pretty(file.as_file_mut(), config)?;
        file.as_file_mut().flush()?;

        let result = self.execute(file.path()).await;

        let path = file.path().to_path_buf();
        if let Err(e) = file.close() {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove generator configuration"
            );
        }
        result
    }

    async fn execute(&self, config_path: &Path) -> Result<(), ApiDocError> {
        let config_arg = config_path.to_string_lossy();
        let args: Vec<String> = self
            .args
            .iter()
            .map(|arg| arg.replace(CONFIG_PLACEHOLDER, &config_arg))
            .collect();

        tracing::info!(command = %self.command, args = ?args, "Running API doc generator");

        let output = tokio::process::Command::new(&self.command)
            .args(&args)
            .output()
            .await
            .map_err(|source| ApiDocError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!(
                command = %self.command,
                status = %output.status,
                stderr = %stderr,
                "API doc generation failed"
            );
            return Err(ApiDocError::Failed {
                command: self.command.clone(),
                status: output.status,
                stderr,
            });
        }

        tracing::info!(command = %self.command, "API doc generation finished");
        Ok(())
    }
}
