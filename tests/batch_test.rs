//! Whole-version indexing against an in-memory index.

mod common;

use assert2::{check, let_assert};
use common::{anchored, doc, h, p, project, version};
use docsearch::error::{BatchError, IndexError};
use docsearch::{
    Document, IndexSettings, MemoryIndex, Node, Project, ProjectVersion, SearchIndex,
    SearchRecord, Value, VersionBatch, build_records,
};
use rstest::rstest;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_util::sync::CancellationToken;

fn documents() -> Vec<Document> {
    vec![
        doc("index", vec![anchored(1, "welcome", "Welcome"), p("Start here")]),
        doc("install", vec![h(1, "Install"), p("pip install widgets"), p("Done")]),
        doc("empty", vec![]),
        doc("faq", vec![anchored(2, "why", "Why"), p("Because")]),
    ]
}

/// Index whose uploads always fail.
#[derive(Default)]
struct RejectingIndex {
    initialized: AtomicUsize,
}

impl SearchIndex for RejectingIndex {
    async fn initialize(&self) -> Result<(), IndexError> {
        self.initialized.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn add_records(&self, _records: &[SearchRecord]) -> Result<(), IndexError> {
        Err(IndexError::Status {
            operation: "batch",
            status: 500,
            body: "boom".to_string(),
        })
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn index_replaces_contents(project: Project, version: ProjectVersion) {
    let index = MemoryIndex::new();
    let batch = VersionBatch::new(project, version);
    let cancel = CancellationToken::new();

    let_assert!(Ok(summary) = batch.index(&index, documents(), &cancel).await);
    check!(summary.documents == 4);
    check!(summary.records == 7);
    check!(index.settings().await == Some(IndexSettings::default()));
    check!(index.upload_count().await == 1);

    // A second run fully replaces rather than appends
    let_assert!(Ok(_) = batch.index(&index, documents(), &cancel).await);
    check!(index.records().await.len() == 7);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concatenation_preserves_document_order(project: Project, version: ProjectVersion) {
    let batch = VersionBatch::new(project.clone(), version.clone());
    let records = batch
        .build(documents(), &CancellationToken::new())
        .await
        .unwrap();

    let sequential: Vec<SearchRecord> = documents()
        .iter()
        .flat_map(|d| build_records(d, &project, &version).unwrap())
        .collect();
    check!(records == sequential);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_document_leaves_index_untouched(project: Project, version: ProjectVersion) {
    let index = MemoryIndex::new();
    let batch = VersionBatch::new(project, version);
    let cancel = CancellationToken::new();
    batch.index(&index, documents(), &cancel).await.unwrap();

    let mut docs = documents();
    docs.push(doc(
        "broken",
        vec![Node::paragraph(Value::Scalar(serde_json::Value::Null))],
    ));

    let result = batch.index(&index, docs, &cancel).await;
    let_assert!(Err(BatchError::Render { slug, .. }) = result);
    check!(slug == "broken");
    check!(index.records().await.len() == 7);
    check!(index.upload_count().await == 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancelled_batch_uploads_nothing(project: Project, version: ProjectVersion) {
    let index = MemoryIndex::new();
    let batch = VersionBatch::new(project, version);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = batch.index(&index, documents(), &cancel).await;
    let_assert!(Err(BatchError::Cancelled) = result);
    check!(index.settings().await.is_none());
    check!(index.upload_count().await == 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upload_failure_propagates(project: Project, version: ProjectVersion) {
    let index = RejectingIndex::default();
    let batch = VersionBatch::new(project, version);

    let result = batch
        .index(&index, documents(), &CancellationToken::new())
        .await;
    let_assert!(Err(BatchError::Index(IndexError::Status { status: 500, .. })) = result);
    check!(index.initialized.load(Ordering::SeqCst) == 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn source_marker_is_configurable(project: Project, version: ProjectVersion) {
    let batch = VersionBatch::new(project, version).with_source_marker("@@generated");
    let docs = vec![doc("page", vec![p("@@generated from widgets.py"), p("kept")])];

    let records = batch.build(docs, &CancellationToken::new()).await.unwrap();
    check!(records.len() == 1);
    check!(records[0].content == "kept");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn initialize_twice_is_idempotent() {
    let index = MemoryIndex::new();
    index.initialize().await.unwrap();
    let first = (index.settings().await, index.records().await);
    index.initialize().await.unwrap();
    check!((index.settings().await, index.records().await) == first);
}
