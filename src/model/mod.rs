// Model provisioning and loading for the sentence encoder.

pub mod download;

use std::path::Path;
use std::sync::Arc;

use crate::error::CheckError;
use crate::similarity::embeddings::SentenceEmbedder;
use crate::similarity::encoder::TextEncoder;

/// Load the ONNX sentence encoder from the model directory.
pub fn load_encoder(model_dir: &Path) -> Result<Arc<dyn TextEncoder>, CheckError> {
    let embedder = SentenceEmbedder::load(&download::encoder_model_dir(model_dir))?;
    Ok(Arc::new(embedder))
}
