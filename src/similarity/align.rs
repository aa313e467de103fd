// Sentence alignment: which individual sentences correspond across documents.
//
// Two modes share one primitive (normalised sentence embeddings compared by
// dot product) but differ in what they keep:
//
// - One-vs-corpus keeps, for each query sentence, only its best match over
//   every corpus sentence, and only if that best match exceeds the threshold.
// - One-vs-one keeps every (sentence1, sentence2) pair above the threshold.
//
// Consumers deduplicate the two result shapes differently, so the asymmetry
// is part of the contract. Query sentences are matched independently
// (nearest neighbour per sentence); there is no global alignment.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::encoder::{encode_checked, TextEncoder};
use super::vector::{dot, max_or_zero, normalize_all};
use crate::error::CheckError;
use crate::text::document::Document;
use crate::text::segment::split_sentences;

/// Cosine a sentence pair must strictly exceed to count as a match.
pub const MATCH_THRESHOLD: f64 = 0.5;

/// A query sentence whose best corpus match exceeded the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceMatch {
    pub sentence: String,
    /// Best cosine over the corpus, as a percentage (always > 50)
    pub similarity: f64,
}

/// A sentence pair from a one-vs-one comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentencePair {
    pub sentence1: String,
    pub sentence2: String,
    /// Cosine as a percentage (always > 50)
    pub similarity: f64,
}

/// Best-match-only alignment over pre-computed, normalised embeddings.
pub fn best_matches(
    query_sentences: &[String],
    query_embeddings: &[Vec<f64>],
    corpus_embeddings: &[Vec<f64>],
) -> Vec<SentenceMatch> {
    query_sentences
        .iter()
        .zip(query_embeddings)
        .filter_map(|(sentence, q)| {
            let best = max_or_zero(corpus_embeddings.iter().map(|c| dot(q, c)));
            (best > MATCH_THRESHOLD).then(|| SentenceMatch {
                sentence: sentence.clone(),
                similarity: best * 100.0,
            })
        })
        .collect()
}

/// All-pairs-above-threshold alignment over pre-computed, normalised embeddings.
pub fn pairs_above_threshold(
    sentences1: &[String],
    embeddings1: &[Vec<f64>],
    sentences2: &[String],
    embeddings2: &[Vec<f64>],
) -> Vec<SentencePair> {
    let mut pairs = Vec::new();
    for (s1, e1) in sentences1.iter().zip(embeddings1) {
        for (s2, e2) in sentences2.iter().zip(embeddings2) {
            let sim = dot(e1, e2);
            if sim > MATCH_THRESHOLD {
                pairs.push(SentencePair {
                    sentence1: s1.clone(),
                    sentence2: s2.clone(),
                    similarity: sim * 100.0,
                });
            }
        }
    }
    pairs
}

/// One-vs-corpus: every query sentence whose nearest corpus sentence exceeds
/// the threshold. Corpus texts are concatenated before segmentation.
pub async fn find_matches(
    encoder: &dyn TextEncoder,
    query: &Document,
    corpus: &[Document],
) -> Result<Vec<SentenceMatch>, CheckError> {
    let query_sentences = query.sentences();
    let corpus_text = corpus
        .iter()
        .map(|d| d.full_text())
        .collect::<Vec<_>>()
        .join(" ");
    let corpus_sentences = split_sentences(&corpus_text);

    if query_sentences.is_empty() || corpus_sentences.is_empty() {
        return Ok(Vec::new());
    }

    let query_embeddings = normalize_all(encode_checked(encoder, &query_sentences).await?);
    let corpus_embeddings = normalize_all(encode_checked(encoder, &corpus_sentences).await?);

    let matches = best_matches(&query_sentences, &query_embeddings, &corpus_embeddings);
    debug!(
        query_sentences = query_sentences.len(),
        corpus_sentences = corpus_sentences.len(),
        matches = matches.len(),
        "Aligned query sentences against corpus"
    );
    Ok(matches)
}

/// One-vs-one: every sentence pair across the two texts above the threshold.
pub async fn find_matches_pairwise(
    encoder: &dyn TextEncoder,
    text1: &str,
    text2: &str,
) -> Result<Vec<SentencePair>, CheckError> {
    let sentences1 = split_sentences(text1);
    let sentences2 = split_sentences(text2);

    if sentences1.is_empty() || sentences2.is_empty() {
        return Ok(Vec::new());
    }

    let embeddings1 = normalize_all(encode_checked(encoder, &sentences1).await?);
    let embeddings2 = normalize_all(encode_checked(encoder, &sentences2).await?);

    Ok(pairs_above_threshold(
        &sentences1,
        &embeddings1,
        &sentences2,
        &embeddings2,
    ))
}
