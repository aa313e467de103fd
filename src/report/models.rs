// Result records returned to the request boundary.
//
// Lexical and semantic scores are always two separate fields. Nothing here
// blends them.

use serde::{Deserialize, Serialize};

use crate::similarity::align::{SentenceMatch, SentencePair};
use crate::style::profile::StyleProfile;
use crate::text::document::DocumentMetadata;

/// One-vs-corpus result for a submitted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    pub metadata: DocumentMetadata,
    /// TF-IDF similarity to the closest corpus document, 0-100
    pub lexical_score: f64,
    /// Embedding similarity to the closest corpus document, 0-100
    pub semantic_score: f64,
    /// Number of corpus documents the query was compared against
    pub corpus_size: usize,
    pub matches: Vec<SentenceMatch>,
    pub paragraphs: Vec<String>,
    #[serde(flatten)]
    pub style: StyleProfile,
}

impl CheckReport {
    /// Paragraphs with their drift flag, in document order.
    pub fn flagged_paragraphs(&self) -> impl Iterator<Item = (usize, &str)> {
        self.paragraphs
            .iter()
            .zip(&self.style.inconsistent)
            .enumerate()
            .filter(|(_, (_, flagged))| **flagged)
            .map(|(i, (p, _))| (i, p.as_str()))
    }
}

/// One side of a one-vs-one comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparedDocument {
    pub metadata: DocumentMetadata,
    pub paragraphs: Vec<String>,
    /// Distinct sentences of this document that appear in any matched pair,
    /// in first-seen order
    pub matched_sentences: Vec<String>,
}

/// One-vs-one result for two stored documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareReport {
    pub first: ComparedDocument,
    pub second: ComparedDocument,
    pub lexical_score: f64,
    pub semantic_score: f64,
    pub pairs: Vec<SentencePair>,
}

/// Distinct values in first-seen order.
pub fn dedup_in_order<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(*item))
        .map(str::to_string)
        .collect()
}
