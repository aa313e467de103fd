use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::model::download;
use crate::pipeline::check::DEFAULT_MAX_UPLOAD_BYTES;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Scoring
/// thresholds are constants in their modules and are not configurable here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory backing the corpus store (one file per submission)
    pub corpus_dir: PathBuf,
    pub db_path: String,
    /// Directory containing the downloaded encoder model
    pub model_dir: PathBuf,
    /// Uploads larger than this are rejected before extraction
    pub max_upload_bytes: u64,
}

impl Config {
    /// Load configuration from environment variables. Every value has a default.
    pub fn load() -> Result<Self> {
        let max_upload_bytes = match env::var("DRAFTCHECK_MAX_UPLOAD_BYTES") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("DRAFTCHECK_MAX_UPLOAD_BYTES is not a byte count: {raw}"))?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            corpus_dir: env::var("DRAFTCHECK_CORPUS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./assignments")),
            db_path: env::var("DRAFTCHECK_DB_PATH")
                .unwrap_or_else(|_| "./draftcheck.db".to_string()),
            model_dir: env::var("DRAFTCHECK_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| download::default_model_dir()),
            max_upload_bytes,
        })
    }

    /// Check that the encoder model has been downloaded.
    /// Call this before any operation that computes semantic similarity.
    pub fn require_encoder(&self) -> Result<()> {
        if !download::encoder_files_present(&self.model_dir) {
            anyhow::bail!(
                "Sentence encoder files not found in {}\n\
                 Run `draftcheck download-model` to download them.",
                download::encoder_model_dir(&self.model_dir).display()
            );
        }
        Ok(())
    }
}
