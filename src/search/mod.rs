//! Search service integration.
//!
//! The index is always fully replaced: [`SearchIndex::initialize`] applies the
//! fixed [`IndexSettings`] and clears existing records, then one bulk
//! [`SearchIndex::add_records`] call loads the new set.

pub mod client;
pub mod memory;
pub mod settings;

pub use client::{HttpSearchIndex, SearchEndpoint, SearchIndex};
pub use memory::MemoryIndex;
pub use settings::IndexSettings;
