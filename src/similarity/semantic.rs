// Semantic similarity: dense embeddings of whole documents.
//
// The query's full text and every corpus document's full text are encoded in
// one batch, L2-normalised, and compared by dot product. The best match over
// the corpus, scaled to [0, 100], is the semantic score.

use tracing::debug;

use super::encoder::{encode_checked, TextEncoder};
use super::vector::{dot, max_or_zero, normalize_all, to_percentage};
use crate::error::CheckError;
use crate::text::document::Document;

/// Highest embedding cosine between the query and any corpus document, as a
/// percentage. An empty corpus scores 0 without touching the encoder.
pub async fn score_semantic(
    encoder: &dyn TextEncoder,
    query: &Document,
    corpus: &[Document],
) -> Result<f64, CheckError> {
    if corpus.is_empty() {
        return Ok(0.0);
    }

    let mut texts = Vec::with_capacity(corpus.len() + 1);
    texts.push(query.full_text());
    texts.extend(corpus.iter().map(|d| d.full_text()));

    let embeddings = normalize_all(encode_checked(encoder, &texts).await?);
    let (query_vec, corpus_vecs) = match embeddings.split_first() {
        Some(split) => split,
        None => return Ok(0.0),
    };

    let best = max_or_zero(corpus_vecs.iter().map(|v| dot(query_vec, v)));
    debug!(
        corpus = corpus_vecs.len(),
        best_cosine = best,
        "Computed semantic similarity"
    );

    Ok(to_percentage(best))
}
