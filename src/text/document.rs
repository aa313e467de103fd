// Document: an ordered list of paragraphs plus the values derived from it.
//
// Paragraph order is significant: the style profile reports one entry per
// paragraph in the same order, and the full text joins paragraphs with a
// single newline so that sentence segmentation still sees the boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::segment::{split_sentences, whitespace_word_count};

/// A submitted document. Read-only once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier within the corpus (the sanitised file name)
    pub id: String,
    /// Paragraphs in document order
    pub paragraphs: Vec<String>,
}

impl Document {
    pub fn new(id: impl Into<String>, paragraphs: Vec<String>) -> Self {
        Self {
            id: id.into(),
            paragraphs,
        }
    }

    /// Paragraphs joined with newlines.
    pub fn full_text(&self) -> String {
        self.paragraphs.join("\n")
    }

    /// True when no paragraph carries any non-whitespace text.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.iter().all(|p| p.trim().is_empty())
    }

    /// Whitespace-separated word count of the full text.
    pub fn word_count(&self) -> usize {
        self.paragraphs
            .iter()
            .map(|p| whitespace_word_count(p))
            .sum()
    }

    /// Sentences of the whole document, in order.
    pub fn sentences(&self) -> Vec<String> {
        split_sentences(&self.full_text())
    }
}

/// Descriptive metadata attached to every result record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub identifier: String,
    /// Size of the stored or uploaded file in bytes
    pub size_bytes: u64,
    pub word_count: usize,
    /// When the document was submitted (file mtime for stored documents)
    pub submitted_at: DateTime<Utc>,
}

impl DocumentMetadata {
    /// Metadata for a document that has just arrived.
    pub fn for_upload(document: &Document, size_bytes: u64) -> Self {
        Self {
            identifier: document.id.clone(),
            size_bytes,
            word_count: document.word_count(),
            submitted_at: Utc::now(),
        }
    }
}
