// Sentence embeddings using paraphrase-MiniLM-L6-v2 via ONNX Runtime.
//
// Each text is tokenized (truncated to the model's 128-token window), run
// through the BERT encoder, and mean-pooled over the attention mask into a
// 384-dimensional vector. The model runs locally: no API calls, no training.
//
// The embedder is loaded once at startup and shared behind Arc<dyn TextEncoder>.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::{Encoding, Tokenizer, TruncationParams};
use tracing::debug;

use super::encoder::TextEncoder;
use crate::error::CheckError;

/// Embedding dimension for paraphrase-MiniLM-L6-v2.
pub const EMBEDDING_DIM: usize = 384;

/// Longest token sequence the model was trained on; longer input is truncated.
pub const MAX_SEQ_LEN: usize = 128;

/// Sentence embedder backed by a local ONNX model.
///
/// `Session::run` takes `&mut self`, so the session sits behind a mutex and
/// every batch runs on the blocking pool.
pub struct SentenceEmbedder {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
}

impl SentenceEmbedder {
    /// Load the model and tokenizer from the given directory.
    ///
    /// Expects `model.onnx` and `tokenizer.json` in the directory.
    /// A missing or unloadable model is reported as `EncoderUnavailable`.
    pub fn load(model_dir: &Path) -> Result<Self, CheckError> {
        load_inner(model_dir).map_err(|e| CheckError::EncoderUnavailable(format!("{e:#}")))
    }
}

fn load_inner(model_dir: &Path) -> Result<SentenceEmbedder> {
    let model_path = model_dir.join("model.onnx");
    let tokenizer_path = model_dir.join("tokenizer.json");

    if !model_path.exists() {
        anyhow::bail!(
            "Embedding model not found: {}\nRun `draftcheck download-model` to download it.",
            model_path.display()
        );
    }
    if !tokenizer_path.exists() {
        anyhow::bail!(
            "Embedding tokenizer not found: {}\nRun `draftcheck download-model` to download it.",
            tokenizer_path.display()
        );
    }

    let session = Session::builder()
        .context("Failed to create ONNX session builder")?
        .commit_from_file(&model_path)
        .with_context(|| {
            format!(
                "Failed to load embedding model from {}",
                model_path.display()
            )
        })?;

    let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
        .map_err(|e| anyhow::anyhow!("Failed to load embedding tokenizer: {}", e))?;
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: MAX_SEQ_LEN,
            ..Default::default()
        }))
        .map_err(|e| anyhow::anyhow!("Failed to configure tokenizer truncation: {}", e))?;
    // Padding is done by hand below so every batch is padded to its own max length
    tokenizer.with_padding(None);

    debug!(
        "Loaded sentence embedding model from {}",
        model_dir.display()
    );

    Ok(SentenceEmbedder {
        session: Arc::new(Mutex::new(session)),
        tokenizer: Arc::new(tokenizer),
    })
}

#[async_trait]
impl TextEncoder for SentenceEmbedder {
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>, CheckError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let texts = texts.to_vec();

        let joined =
            tokio::task::spawn_blocking(move || embed_blocking(&session, &tokenizer, texts)).await;

        match joined {
            Ok(Ok(embeddings)) => Ok(embeddings),
            Ok(Err(e)) => Err(CheckError::EncoderUnavailable(format!("{e:#}"))),
            Err(e) => Err(CheckError::EncoderUnavailable(format!(
                "embedding task failed: {e}"
            ))),
        }
    }
}

/// Tokenize, run and pool one batch. Runs on the blocking pool.
fn embed_blocking(
    session: &Mutex<Session>,
    tokenizer: &Tokenizer,
    texts: Vec<String>,
) -> Result<Vec<Vec<f64>>> {
    let batch = PaddedBatch::tokenize(tokenizer, texts)?;
    if batch.width == 0 {
        return Ok(vec![vec![0.0; EMBEDDING_DIM]; batch.rows]);
    }
    let hidden = run_encoder(session, &batch)?;
    Ok(batch.pool(&hidden))
}

/// A tokenized batch, right-padded to its longest row.
///
/// Rows are laid out back to back, `width` positions each. Token type ids
/// are all zero (single-segment input) and are built at tensor time.
struct PaddedBatch {
    input_ids: Vec<i64>,
    attention_mask: Vec<i64>,
    rows: usize,
    width: usize,
}

impl PaddedBatch {
    fn tokenize(tokenizer: &Tokenizer, texts: Vec<String>) -> Result<Self> {
        let encodings = tokenizer
            .encode_batch(texts, true)
            .map_err(|e| anyhow::anyhow!("Tokenization failed: {e}"))?;
        Ok(Self::from_encodings(&encodings))
    }

    fn from_encodings(encodings: &[Encoding]) -> Self {
        let rows = encodings.len();
        let width = encodings.iter().map(|e| e.len()).max().unwrap_or(0);

        let mut input_ids = Vec::with_capacity(rows * width);
        let mut attention_mask = Vec::with_capacity(rows * width);
        for enc in encodings {
            let row_start = input_ids.len();
            input_ids.extend(enc.get_ids().iter().map(|&id| i64::from(id)));
            attention_mask.extend(enc.get_attention_mask().iter().map(|&m| i64::from(m)));
            input_ids.resize(row_start + width, 0);
            attention_mask.resize(row_start + width, 0);
        }

        Self {
            input_ids,
            attention_mask,
            rows,
            width,
        }
    }

    fn shape(&self) -> [i64; 2] {
        [self.rows as i64, self.width as i64]
    }

    /// Mean of each row's token states, counting only unmasked positions.
    fn pool(&self, hidden: &[f32]) -> Vec<Vec<f64>> {
        hidden
            .chunks_exact(self.width * EMBEDDING_DIM)
            .zip(self.attention_mask.chunks_exact(self.width))
            .map(|(states, mask)| mean_pool(states, mask))
            .collect()
    }
}

/// Run the BERT graph and return `last_hidden_state` flattened
/// to `[rows, width, EMBEDDING_DIM]`.
fn run_encoder(session: &Mutex<Session>, batch: &PaddedBatch) -> Result<Vec<f32>> {
    let shape = batch.shape();
    let input_ids = Tensor::from_array((shape, batch.input_ids.clone()))
        .context("Failed to create input_ids tensor")?;
    let attention_mask = Tensor::from_array((shape, batch.attention_mask.clone()))
        .context("Failed to create attention_mask tensor")?;
    let token_type_ids = Tensor::from_array((shape, vec![0i64; batch.input_ids.len()]))
        .context("Failed to create token_type_ids tensor")?;

    let mut session = session
        .lock()
        .map_err(|e| anyhow::anyhow!("Encoder session lock poisoned: {e}"))?;
    let outputs = session
        .run(ort::inputs! {
            "input_ids" => input_ids,
            "attention_mask" => attention_mask,
            "token_type_ids" => token_type_ids
        })
        .context("Encoder inference failed")?;
    let (_shape, data) = outputs[0]
        .try_extract_tensor::<f32>()
        .context("Failed to read encoder output")?;

    let expected = batch.rows * batch.width * EMBEDDING_DIM;
    if data.len() != expected {
        anyhow::bail!(
            "Encoder returned {} values, expected {expected} for a {}x{} batch",
            data.len(),
            batch.rows,
            batch.width
        );
    }
    debug!(rows = batch.rows, width = batch.width, "Encoded batch");
    Ok(data.to_vec())
}

/// Average the token states of one row (`mask.len()` positions of
/// `EMBEDDING_DIM` values each), weighted by the attention mask.
fn mean_pool(states: &[f32], mask: &[i64]) -> Vec<f64> {
    let mut sum = vec![0.0_f64; EMBEDDING_DIM];
    let mut weight = 0.0_f64;

    for (token, &m) in states.chunks_exact(EMBEDDING_DIM).zip(mask) {
        if m == 0 {
            continue;
        }
        let m = m as f64;
        weight += m;
        for (acc, &x) in sum.iter_mut().zip(token) {
            *acc += f64::from(x) * m;
        }
    }

    if weight > 0.0 {
        sum.iter_mut().for_each(|v| *v /= weight);
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_model_is_encoder_unavailable() {
        let dir = std::env::temp_dir().join("draftcheck-test-no-model");
        match SentenceEmbedder::load(&dir) {
            Err(CheckError::EncoderUnavailable(msg)) => {
                assert!(msg.contains("model.onnx"), "unexpected message: {msg}")
            }
            Err(other) => panic!("expected EncoderUnavailable, got {other:?}"),
            Ok(_) => panic!("loading from an empty directory should fail"),
        }
    }

    #[test]
    fn test_mean_pool_ignores_padding() {
        // One row, two positions; the second is padding and holds junk.
        let mut hidden = vec![0.0_f32; 2 * EMBEDDING_DIM];
        hidden[0] = 2.0;
        hidden[EMBEDDING_DIM] = 100.0;
        let mask = vec![1_i64, 0];
        let pooled = mean_pool(&hidden, &mask);
        assert_eq!(pooled.len(), EMBEDDING_DIM);
        assert!((pooled[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_pool_averages_real_tokens() {
        let mut hidden = vec![0.0_f32; 2 * EMBEDDING_DIM];
        hidden[1] = 1.0;
        hidden[EMBEDDING_DIM + 1] = 3.0;
        let mask = vec![1_i64, 1];
        let pooled = mean_pool(&hidden, &mask);
        assert!((pooled[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_pool_splits_rows() {
        let batch = PaddedBatch {
            input_ids: vec![101, 7, 102, 0],
            attention_mask: vec![1, 1, 1, 0],
            rows: 2,
            width: 2,
        };
        let mut hidden = vec![0.0_f32; 4 * EMBEDDING_DIM];
        hidden[0] = 1.0;
        hidden[EMBEDDING_DIM] = 3.0;
        hidden[2 * EMBEDDING_DIM] = 5.0;
        hidden[3 * EMBEDDING_DIM] = 50.0;

        let pooled = batch.pool(&hidden);
        assert_eq!(pooled.len(), 2);
        assert!((pooled[0][0] - 2.0).abs() < 1e-12);
        // Second row's padding position is ignored
        assert!((pooled[1][0] - 5.0).abs() < 1e-12);
    }
}
