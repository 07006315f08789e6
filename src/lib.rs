//! Builds heading-aware search-index records from rendered documentation trees
//! and loads them into a search service.

pub mod apidoc;
pub mod batch;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod record;
pub mod search;
pub mod tracing;
pub mod types;

pub use apidoc::{ApiDocBuild, ApiDocConfig};
pub use batch::{BatchSummary, VersionBatch};
pub use config::Config;
pub use document::{Document, HeadingLevel, Inline, Node, Value, is_indexable, walk};
pub use error::{ApiDocError, BatchError, IndexError, RenderError};
pub use record::{RecordBuilder, SearchRecord, build_records};
pub use search::{HttpSearchIndex, IndexSettings, MemoryIndex, SearchIndex};
pub use types::{Project, ProjectVersion};
