// Aggregation: run every signal over one request and assemble the record.
//
// The Engine holds the two shared, read-only models (sentence encoder and
// sentiment scorer) and is passed explicitly wherever a check runs. Lexical
// scoring and the style profile are pure CPU work done inline; the two
// encoder-backed signals run concurrently. Any encoder failure fails the
// whole request; a lexical-only result is never returned.

pub mod models;

use std::slice;
use std::sync::Arc;

use tracing::info;

use crate::error::CheckError;
use crate::similarity::align::{find_matches, find_matches_pairwise};
use crate::similarity::encoder::TextEncoder;
use crate::similarity::lexical::score_lexical;
use crate::similarity::semantic::score_semantic;
use crate::style::profile::profile;
use crate::style::sentiment::SentimentScorer;
use crate::text::document::{Document, DocumentMetadata};

pub use models::{CheckReport, CompareReport, ComparedDocument};

/// Shared scoring context, cheap to clone.
#[derive(Clone)]
pub struct Engine {
    encoder: Arc<dyn TextEncoder>,
    sentiment: Arc<dyn SentimentScorer>,
}

impl Engine {
    pub fn new(encoder: Arc<dyn TextEncoder>, sentiment: Arc<dyn SentimentScorer>) -> Self {
        Self { encoder, sentiment }
    }

    /// One-vs-corpus check of `query` against a corpus snapshot that must
    /// already exclude the query itself.
    pub async fn check(
        &self,
        query: &Document,
        metadata: DocumentMetadata,
        corpus: &[Document],
    ) -> Result<CheckReport, CheckError> {
        if query.is_empty() {
            return Err(CheckError::EmptyDocument);
        }

        let lexical_score = score_lexical(query, corpus);
        let (semantic_score, matches) = tokio::try_join!(
            score_semantic(self.encoder.as_ref(), query, corpus),
            find_matches(self.encoder.as_ref(), query, corpus),
        )?;
        let style = profile(self.sentiment.as_ref(), query);

        info!(
            document = %query.id,
            corpus = corpus.len(),
            lexical = lexical_score,
            semantic = semantic_score,
            matches = matches.len(),
            flagged_paragraphs = style.flagged_count(),
            "Checked document"
        );

        Ok(CheckReport {
            metadata,
            lexical_score,
            semantic_score,
            corpus_size: corpus.len(),
            matches,
            paragraphs: query.paragraphs.clone(),
            style,
        })
    }

    /// One-vs-one comparison. Scores are directional (first against second)
    /// though both signals are symmetric in practice.
    pub async fn compare(
        &self,
        first: (&Document, DocumentMetadata),
        second: (&Document, DocumentMetadata),
    ) -> Result<CompareReport, CheckError> {
        let (doc1, meta1) = first;
        let (doc2, meta2) = second;
        if doc1.is_empty() || doc2.is_empty() {
            return Err(CheckError::EmptyDocument);
        }

        let other = slice::from_ref(doc2);
        let (text1, text2) = (doc1.full_text(), doc2.full_text());
        let lexical_score = score_lexical(doc1, other);
        let (semantic_score, pairs) = tokio::try_join!(
            score_semantic(self.encoder.as_ref(), doc1, other),
            find_matches_pairwise(self.encoder.as_ref(), &text1, &text2),
        )?;

        info!(
            first = %doc1.id,
            second = %doc2.id,
            lexical = lexical_score,
            semantic = semantic_score,
            pairs = pairs.len(),
            "Compared documents"
        );

        let matched1 = models::dedup_in_order(pairs.iter().map(|p| p.sentence1.as_str()));
        let matched2 = models::dedup_in_order(pairs.iter().map(|p| p.sentence2.as_str()));

        Ok(CompareReport {
            first: ComparedDocument {
                metadata: meta1,
                paragraphs: doc1.paragraphs.clone(),
                matched_sentences: matched1,
            },
            second: ComparedDocument {
                metadata: meta2,
                paragraphs: doc2.paragraphs.clone(),
                matched_sentences: matched2,
            },
            lexical_score,
            semantic_score,
            pairs,
        })
    }
}
