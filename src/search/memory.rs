//! In-process search index used for dry runs and tests.

use super::client::SearchIndex;
use super::settings::IndexSettings;
use crate::error::IndexError;
use crate::record::SearchRecord;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct MemoryState {
    settings: Option<IndexSettings>,
    records: Vec<SearchRecord>,
    uploads: usize,
}

/// A search index that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    settings: IndexSettings,
    state: RwLock<MemoryState>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings applied by the last `initialize`, if any.
    pub async fn settings(&self) -> Option<IndexSettings> {
        self.state.read().await.settings.clone()
    }

    pub async fn records(&self) -> Vec<SearchRecord> {
        self.state.read().await.records.clone()
    }

    /// Number of bulk uploads received.
    pub async fn upload_count(&self) -> usize {
        self.state.read().await.uploads
    }
}

impl SearchIndex for MemoryIndex {
    async fn initialize(&self) -> Result<(), IndexError> {
        let mut state = self.state.write().await;
        state.settings = Some(self.settings.clone());
        state.records.clear();
        Ok(())
    }

    async fn add_records(&self, records: &[SearchRecord]) -> Result<(), IndexError> {
        let mut state = self.state.write().await;
        state.records.extend_from_slice(records);
        state.uploads += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn record(id: &str) -> SearchRecord {
        SearchRecord {
            object_id: id.to_string(),
            rank: 6,
            h1: None,
            h2: None,
            h3: None,
            h4: None,
            h5: None,
            content: "text".to_string(),
            url: "/projects/w/en/latest/index".to_string(),
            project_name: "w".to_string(),
            tags: ["latest".to_string(), "w".to_string()],
        }
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let index = MemoryIndex::new();
        index.add_records(&[record("a"), record("b")]).await.unwrap();

        index.initialize().await.unwrap();
        let first = (index.settings().await, index.records().await);
        index.initialize().await.unwrap();
        let second = (index.settings().await, index.records().await);

        check!(first == second);
        check!(second.0 == Some(IndexSettings::default()));
        check!(second.1.is_empty());
    }

    #[tokio::test]
    async fn test_add_records_appends_in_order() {
        let index = MemoryIndex::new();
        index.add_records(&[record("a")]).await.unwrap();
        index.add_records(&[record("b")]).await.unwrap();

        let ids: Vec<_> = index.records().await.into_iter().map(|r| r.object_id).collect();
        check!(ids == ["a", "b"]);
        check!(index.upload_count().await == 2);
    }
}
