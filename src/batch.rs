//! Indexing a whole project version: parallel record building, then one full
//! replacement upload.
//!
//! Documents are independent, so each is folded on its own blocking task with
//! its own heading and anchor state. Records are concatenated in input document
//! order. Cancellation applies to the batch as a whole: partial results are
//! dropped and nothing is uploaded.

use crate::document::Document;
use crate::error::BatchError;
use crate::record::{DEFAULT_SOURCE_MARKER, RecordBuilder, SearchRecord};
use crate::search::SearchIndex;
use crate::types::{Project, ProjectVersion};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Outcome of a successful batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub documents: usize,
    pub records: usize,
}

/// Builds and uploads the records of one project version.
#[derive(Debug, Clone)]
pub struct VersionBatch {
    project: Arc<Project>,
    version: Arc<ProjectVersion>,
    source_marker: Arc<str>,
}

impl VersionBatch {
    pub fn new(project: Project, version: ProjectVersion) -> Self {
        Self {
            project: Arc::new(project),
            version: Arc::new(version),
            source_marker: Arc::from(DEFAULT_SOURCE_MARKER),
        }
    }

    #[must_use]
    pub fn with_source_marker(mut self, marker: &str) -> Self {
        self.source_marker = Arc::from(marker);
        self
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn version(&self) -> &ProjectVersion {
        &self.version
    }

    /// Builds records for every document without touching the index.
    ///
    /// The first document that fails to render fails the batch.
    pub async fn build(
        &self,
        documents: Vec<Document>,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchRecord>, BatchError> {
        let start = Instant::now();
        let document_count = documents.len();

        let tasks = documents.into_iter().map(|document| {
            let project = Arc::clone(&self.project);
            let version = Arc::clone(&self.version);
            let marker = Arc::clone(&self.source_marker);
            tokio::task::spawn_blocking(move || {
                RecordBuilder::new(&project, &version)
                    .with_source_marker(&marker)
                    .build(&document)
                    .map_err(|source| BatchError::Render {
                        slug: document.slug.clone(),
                        source,
                    })
            })
        });
        let joined = futures::future::try_join_all(tasks);

        let per_document = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::warn!(version = %self.version.slug, "Record building cancelled");
                return Err(BatchError::Cancelled);
            }
            joined = joined => joined?,
        };

        let mut records = Vec::new();
        for result in per_document {
            records.extend(result?);
        }

        tracing::info!(
            project = %self.project.slug,
            version = %self.version.slug,
            documents = document_count,
            records = records.len(),
            elapsed = ?start.elapsed(),
            "Built records for version"
        );
        Ok(records)
    }

    /// Builds all records, then replaces the index contents with them.
    ///
    /// The index is only initialized once every document has rendered, so a
    /// malformed document never leaves it cleared.
    pub async fn index<I: SearchIndex>(
        &self,
        index: &I,
        documents: Vec<Document>,
        cancel: &CancellationToken,
    ) -> Result<BatchSummary, BatchError> {
        let document_count = documents.len();
        let records = self.build(documents, cancel).await?;

        if cancel.is_cancelled() {
            return Err(BatchError::Cancelled);
        }

        index.initialize().await?;
        index.add_records(&records).await?;

        tracing::info!(
            project = %self.project.slug,
            version = %self.version.slug,
            records = records.len(),
            "Index replaced"
        );
        Ok(BatchSummary {
            documents: document_count,
            records: records.len(),
        })
    }
}
