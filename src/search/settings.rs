//! Fixed index configuration applied before every full upload.

use serde::{Deserialize, Serialize};

/// Index settings in the search service's JSON schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSettings {
    pub searchable_attributes: Vec<String>,
    pub custom_ranking: Vec<String>,
    pub ranking: Vec<String>,
    #[serde(rename = "minWordSizefor1Typo")]
    pub min_word_size_for_1_typo: u8,
    #[serde(rename = "minWordSizefor2Typos")]
    pub min_word_size_for_2_typos: u8,
    pub allow_typos_on_numeric_tokens: bool,
    pub min_proximity: u8,
    pub ignore_plurals: bool,
    pub advanced_syntax: bool,
    pub remove_words_if_no_results: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            // h6 stays searchable even though records never carry it
            searchable_attributes: strings(&[
                "projectName",
                "h1",
                "h2",
                "h3",
                "h4",
                "h5",
                "h6",
                "content",
            ]),
            custom_ranking: strings(&["asc(rank)"]),
            ranking: strings(&["words", "typo", "attribute", "proximity", "custom"]),
            min_word_size_for_1_typo: 3,
            min_word_size_for_2_typos: 7,
            allow_typos_on_numeric_tokens: false,
            min_proximity: 2,
            ignore_plurals: true,
            advanced_syntax: true,
            remove_words_if_no_results: "allOptional".to_string(),
        }
    }
}
