//! Folds a document's titles and paragraphs into search records.
//!
//! Processing is strictly sequential: each record's heading breadcrumb and
//! anchor depend on every title seen before it in the same document. The
//! running state is an explicit [`FoldState`] value threaded through
//! [`Iterator::try_fold`], one step per node.

use super::context::{HeadingContext, anchor_for_title};
use super::digest::ContentDigest;
use super::sanitize::strip_markup;
use super::{PARAGRAPH_RANK, SearchRecord, heading_rank};
use crate::document::{
    Document, HeadingLevel, Node, Value, is_indexable, render_html, render_text, walk,
};
use crate::error::RenderError;
use crate::types::{Project, ProjectVersion};

/// Text that marks an injected source-file path directive.
pub const DEFAULT_SOURCE_MARKER: &str = ":source_path:";

/// Per-document traversal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldState {
    pub context: HeadingContext,
    /// Page slug, optionally with `.html#<id>` appended
    pub anchor: String,
}

impl FoldState {
    pub fn new(document: &Document) -> Self {
        Self {
            context: HeadingContext::default(),
            anchor: document.slug.clone(),
        }
    }
}

/// Builds search records for the documents of one project version.
#[derive(Debug, Clone)]
pub struct RecordBuilder<'a> {
    project: &'a Project,
    version: &'a ProjectVersion,
    source_marker: &'a str,
}

impl<'a> RecordBuilder<'a> {
    pub const fn new(project: &'a Project, version: &'a ProjectVersion) -> Self {
        Self {
            project,
            version,
            source_marker: DEFAULT_SOURCE_MARKER,
        }
    }

    /// Overrides the marker text that excludes a node. An empty marker disables exclusion.
    #[must_use]
    pub const fn with_source_marker(mut self, marker: &'a str) -> Self {
        self.source_marker = marker;
        self
    }

    /// Builds the records of one document in document order.
    ///
    /// Any node that fails to render aborts the whole document.
    pub fn build(&self, document: &Document) -> Result<Vec<SearchRecord>, RenderError> {
        let (_, records) = walk(document, is_indexable).try_fold(
            (FoldState::new(document), Vec::new()),
            |(state, mut records), node| {
                let (state, record) = self.step(document, state, node)?;
                records.extend(record);
                Ok::<_, RenderError>((state, records))
            },
        )?;

        tracing::debug!(
            slug = %document.slug,
            version = %self.version.slug,
            records = records.len(),
            "Built search records"
        );
        Ok(records)
    }

    /// Processes one node: `(state, node) -> (state', record)`.
    ///
    /// Nodes carrying the source marker return the state unchanged and no record.
    pub fn step(
        &self,
        document: &Document,
        state: FoldState,
        node: &Node,
    ) -> Result<(FoldState, Option<SearchRecord>), RenderError> {
        let (level, value) = match node {
            Node::Title { level, value } => (Some(*level), value),
            Node::Paragraph { value } => (None, value),
            Node::Other { .. } => return Ok((state, None)),
        };

        let text = render_text(value)?;
        if !self.source_marker.is_empty() && text.contains(self.source_marker) {
            tracing::debug!(slug = %document.slug, "Skipping source path directive");
            return Ok((state, None));
        }
        let html = render_html(node)?;

        let FoldState {
            mut context,
            mut anchor,
        } = state;

        if level.is_some() {
            anchor = anchor_for_title(&document.slug, &html);
        }

        let rank = level.map_or(PARAGRAPH_RANK, heading_rank);

        let content = match level {
            Some(level) if level != HeadingLevel::H6 => {
                context.observe(level, strip_markup(&text));
                String::new()
            }
            _ => strip_markup(&text),
        };

        let record = self.record(&context, &anchor, rank, content, value)?;
        Ok((FoldState { context, anchor }, Some(record)))
    }

    fn record(
        &self,
        context: &HeadingContext,
        anchor: &str,
        rank: u8,
        content: String,
        value: &Value,
    ) -> Result<SearchRecord, RenderError> {
        let digest = ContentDigest::of(&render_text(value)?);
        let [h1, h2, h3, h4, h5] = context.slots().clone();

        Ok(SearchRecord {
            object_id: format!("{}-{}-{}", self.version.slug, anchor, digest),
            rank,
            h1,
            h2,
            h3,
            h4,
            h5,
            content,
            url: format!(
                "/projects/{}/en/{}/{}",
                self.project.docs_slug, self.version.slug, anchor
            ),
            project_name: self.project.short_name.clone(),
            tags: [self.version.slug.clone(), self.project.slug.clone()],
        })
    }
}

/// Builds the records of `document` with the default source marker.
pub fn build_records(
    document: &Document,
    project: &Project,
    version: &ProjectVersion,
) -> Result<Vec<SearchRecord>, RenderError> {
    RecordBuilder::new(project, version).build(document)
}
