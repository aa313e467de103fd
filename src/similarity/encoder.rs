// Sentence encoder trait: the swap-ready abstraction over the embedding model.
//
// The production implementation is the local ONNX SentenceEmbedder. Tests
// plug in deterministic encoders so the scorers and aligner can be exercised
// without a model download.

use async_trait::async_trait;

use crate::error::CheckError;

/// Maps texts to fixed-length dense vectors. Implementations are loaded once
/// and shared read-only across requests, so they must be Send + Sync.
#[async_trait]
pub trait TextEncoder: Send + Sync {
    /// Encode a batch of texts, returning one vector per text in the same order.
    ///
    /// Any failure to run the model is reported as `EncoderUnavailable`.
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>, CheckError>;
}

/// Encode a batch and check the encoder kept its one-vector-per-text promise.
pub(crate) async fn encode_checked(
    encoder: &dyn TextEncoder,
    texts: &[String],
) -> Result<Vec<Vec<f64>>, CheckError> {
    if texts.is_empty() {
        return Ok(Vec::new());
    }
    let vectors = encoder.encode_batch(texts).await?;
    if vectors.len() != texts.len() {
        return Err(CheckError::EncoderUnavailable(format!(
            "encoder returned {} vectors for {} texts",
            vectors.len(),
            texts.len()
        )));
    }
    Ok(vectors)
}
