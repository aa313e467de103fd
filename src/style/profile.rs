// Per-paragraph style metrics and drift detection.
//
// Each paragraph gets three independent metrics. A paragraph is flagged when
// any metric jumps past its threshold relative to the paragraph immediately
// before it. The comparison is strictly pairwise (no running baseline) and
// strictly greater-than, so a delta exactly at the threshold is not a flag.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::sentiment::SentimentScorer;
use crate::text::document::Document;
use crate::text::segment::{split_sentences, split_words, whitespace_word_count};

pub const SENTIMENT_DELTA_THRESHOLD: f64 = 0.5;
pub const TTR_DELTA_THRESHOLD: f64 = 0.1;
pub const SENTENCE_LENGTH_DELTA_THRESHOLD: f64 = 5.0;

/// Absorbs binary float noise so that, e.g., |0.7 - 0.8| is not read as
/// slightly above 0.1.
const FLOAT_TOLERANCE: f64 = 1e-9;

/// Style metrics for one paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParagraphMetrics {
    /// Compound polarity in [-1, 1]
    pub sentiment: f64,
    /// Distinct tokens / tokens, in [0, 1]
    pub ttr: f64,
    /// Mean words per sentence
    pub avg_sentence_length: f64,
}

/// Metrics and drift flags, one entry per paragraph in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    pub metrics: Vec<ParagraphMetrics>,
    pub inconsistent: Vec<bool>,
}

impl StyleProfile {
    pub fn flagged_count(&self) -> usize {
        self.inconsistent.iter().filter(|f| **f).count()
    }
}

/// Type-token ratio over the paragraph's word tokens. Case-sensitive;
/// punctuation marks count as tokens.
pub fn type_token_ratio(paragraph: &str) -> f64 {
    let tokens = split_words(paragraph);
    if tokens.is_empty() {
        return 0.0;
    }
    let distinct: std::collections::HashSet<&str> = tokens.iter().copied().collect();
    distinct.len() as f64 / tokens.len() as f64
}

/// Mean whitespace-delimited word count over the paragraph's sentences.
pub fn average_sentence_length(paragraph: &str) -> f64 {
    let sentences = split_sentences(paragraph);
    if sentences.is_empty() {
        return 0.0;
    }
    let total: usize = sentences.iter().map(|s| whitespace_word_count(s)).sum();
    total as f64 / sentences.len() as f64
}

pub fn compute_paragraph_metrics(sentiment: &dyn SentimentScorer, paragraph: &str) -> ParagraphMetrics {
    ParagraphMetrics {
        sentiment: sentiment.polarity(paragraph),
        ttr: type_token_ratio(paragraph),
        avg_sentence_length: average_sentence_length(paragraph),
    }
}

fn exceeds(delta: f64, threshold: f64) -> bool {
    delta - threshold > FLOAT_TOLERANCE
}

/// One backward-looking pass: `flags[i]` compares paragraph i with i-1.
/// `flags[0]` is always false.
pub fn detect_inconsistencies(metrics: &[ParagraphMetrics]) -> Vec<bool> {
    let mut flags = Vec::with_capacity(metrics.len());
    if metrics.is_empty() {
        return flags;
    }
    flags.push(false);
    for pair in metrics.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        let flagged = exceeds((cur.sentiment - prev.sentiment).abs(), SENTIMENT_DELTA_THRESHOLD)
            || exceeds((cur.ttr - prev.ttr).abs(), TTR_DELTA_THRESHOLD)
            || exceeds(
                (cur.avg_sentence_length - prev.avg_sentence_length).abs(),
                SENTENCE_LENGTH_DELTA_THRESHOLD,
            );
        flags.push(flagged);
    }
    flags
}

/// Profile every paragraph of a document.
pub fn profile(sentiment: &dyn SentimentScorer, document: &Document) -> StyleProfile {
    let metrics: Vec<ParagraphMetrics> = document
        .paragraphs
        .iter()
        .map(|p| compute_paragraph_metrics(sentiment, p))
        .collect();
    let inconsistent = detect_inconsistencies(&metrics);

    let profile = StyleProfile {
        metrics,
        inconsistent,
    };
    debug!(
        paragraphs = profile.metrics.len(),
        flagged = profile.flagged_count(),
        "Profiled paragraph style"
    );
    profile
}
