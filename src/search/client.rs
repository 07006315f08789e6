//! Search service collaborator: the index trait and its REST implementation.

use super::settings::IndexSettings;
use crate::error::IndexError;
use crate::record::SearchRecord;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;

/// A remote (or in-process) search index that receives full replacements.
pub trait SearchIndex: Send + Sync {
    /// Applies [`IndexSettings`] and removes every existing record.
    ///
    /// Calling it twice in a row leaves the same configuration and an empty index.
    fn initialize(&self) -> impl Future<Output = Result<(), IndexError>> + Send;

    /// Writes all records in a single bulk call.
    fn add_records(
        &self,
        records: &[SearchRecord],
    ) -> impl Future<Output = Result<(), IndexError>> + Send;
}

/// Connection details for the search service.
#[derive(Debug, Clone)]
pub struct SearchEndpoint {
    /// Service root, e.g. `https://APPID.algolia.net`
    pub base_url: String,
    pub app_id: String,
    pub api_key: String,
    pub index_name: String,
    pub timeout: Duration,
}

/// REST client for an Algolia-compatible index.
#[derive(Debug, Clone)]
pub struct HttpSearchIndex {
    client: Client,
    base_url: String,
    index_name: String,
    settings: IndexSettings,
}

impl HttpSearchIndex {
    pub fn new(endpoint: SearchEndpoint) -> Result<Self, IndexError> {
        let SearchEndpoint {
            base_url,
            app_id,
            api_key,
            index_name,
            timeout,
        } = endpoint;

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(IndexError::Config(format!(
                "base url must be http(s), got '{}'",
                base_url
            )));
        }
        if index_name.is_empty()
            || !index_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(IndexError::Config(format!(
                "invalid index name '{}'",
                index_name
            )));
        }
        if app_id.trim().is_empty() || api_key.trim().is_empty() {
            return Err(IndexError::Config(
                "application id and api key are required".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Algolia-Application-Id",
            HeaderValue::from_str(app_id.trim())
                .map_err(|_| IndexError::Config("invalid application id".to_string()))?,
        );
        let mut key = HeaderValue::from_str(api_key.trim())
            .map_err(|_| IndexError::Config("invalid api key".to_string()))?;
        key.set_sensitive(true);
        headers.insert("X-Algolia-API-Key", key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            index_name,
            settings: IndexSettings::default(),
        })
    }

    #[must_use]
    pub fn with_settings(mut self, settings: IndexSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    fn index_url(&self, operation: &str) -> String {
        format!(
            "{}/1/indexes/{}/{}",
            self.base_url, self.index_name, operation
        )
    }

    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<(), IndexError> {
        let response = request.send().await.inspect_err(|e| {
            tracing::error!(
                index = %self.index_name,
                operation,
                error = %e,
                "Search service unreachable"
            );
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(
                index = %self.index_name,
                operation,
                status = status.as_u16(),
                "Search service call succeeded"
            );
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<body unavailable>".to_string());
        tracing::error!(
            index = %self.index_name,
            operation,
            status = status.as_u16(),
            body = %body,
            "Search service call failed"
        );
        Err(IndexError::Status {
            operation,
            status: status.as_u16(),
            body,
        })
    }
}

impl SearchIndex for HttpSearchIndex {
    async fn initialize(&self) -> Result<(), IndexError> {
        let settings = self.client.put(self.index_url("settings")).json(&self.settings);
        self.send("settings", settings).await?;

        let clear = self.client.post(self.index_url("clear"));
        self.send("clear", clear).await
    }

    async fn add_records(&self, records: &[SearchRecord]) -> Result<(), IndexError> {
        let batch = self
            .client
            .post(self.index_url("batch"))
            .json(&BatchRequest::add_objects(records));
        self.send("batch", batch).await?;

        tracing::info!(index = %self.index_name, records = records.len(), "Uploaded records");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct BatchRequest<'a> {
    requests: Vec<BatchOperation<'a>>,
}

#[derive(Debug, Serialize)]
struct BatchOperation<'a> {
    action: &'static str,
    body: &'a SearchRecord,
}

impl<'a> BatchRequest<'a> {
    fn add_objects(records: &'a [SearchRecord]) -> Self {
        Self {
            requests: records
                .iter()
                .map(|body| BatchOperation {
                    action: "addObject",
                    body,
                })
                .collect(),
        }
    }
}
