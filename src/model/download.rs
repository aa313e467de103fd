// Model download helper for the sentence encoder.
//
// Downloads paraphrase-MiniLM-L6-v2 (ONNX export + tokenizer) from
// HuggingFace into a platform-appropriate directory
// (~/.local/share/draftcheck/models/ on Linux) so it persists across runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// Name of the encoder model, also its subdirectory under the model dir.
pub const ENCODER_MODEL_NAME: &str = "paraphrase-MiniLM-L6-v2";

/// HuggingFace repo for the sentence encoder.
const ENCODER_HF_URL: &str =
    "https://huggingface.co/sentence-transformers/paraphrase-MiniLM-L6-v2/resolve/main";

/// Remote paths within the repo, and the flat local names they're saved as.
const REMOTE_MODEL_FILE: &str = "onnx/model.onnx";
const REMOTE_TOKENIZER_FILE: &str = "tokenizer.json";
const MODEL_FILE: &str = "model.onnx";
const TOKENIZER_FILE: &str = "tokenizer.json";

/// Returns the default directory for storing model files.
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("draftcheck")
        .join("models")
}

/// Subdirectory within the model dir holding the encoder files.
pub fn encoder_model_dir(base: &Path) -> PathBuf {
    base.join(ENCODER_MODEL_NAME)
}

/// Check whether both encoder files exist.
pub fn encoder_files_present(base: &Path) -> bool {
    let dir = encoder_model_dir(base);
    dir.join(MODEL_FILE).exists() && dir.join(TOKENIZER_FILE).exists()
}

/// Download the encoder model and tokenizer.
///
/// Skips files that already exist and creates directories as needed.
pub async fn download_model(base: &Path) -> Result<()> {
    let dir = encoder_model_dir(base);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create model directory: {}", dir.display()))?;

    println!("\nSentence encoder ({ENCODER_MODEL_NAME}):");

    let tokenizer_path = dir.join(TOKENIZER_FILE);
    if tokenizer_path.exists() {
        info!("Encoder tokenizer already exists, skipping");
        println!("  {TOKENIZER_FILE} (already exists)");
    } else {
        println!("  Downloading {TOKENIZER_FILE}...");
        download_file(
            &format!("{ENCODER_HF_URL}/{REMOTE_TOKENIZER_FILE}"),
            &tokenizer_path,
            false,
        )
        .await?;
    }

    let model_path = dir.join(MODEL_FILE);
    if model_path.exists() {
        info!("Encoder model already exists, skipping");
        println!("  {MODEL_FILE} (already exists)");
    } else {
        println!("  Downloading {MODEL_FILE} (~90 MB)...");
        download_file(
            &format!("{ENCODER_HF_URL}/{REMOTE_MODEL_FILE}"),
            &model_path,
            true,
        )
        .await?;
    }

    Ok(())
}

fn progress_bar(total_size: Option<u64>) -> Result<ProgressBar> {
    let pb = match total_size {
        Some(size) => {
            let pb = ProgressBar::new(size);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("    [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")?
                    .progress_chars("=> "),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(ProgressStyle::default_spinner().template("    {spinner} {bytes}")?);
            pb
        }
    };
    Ok(pb)
}

/// Download a single file, writing it under a temporary name first so an
/// interrupted download never leaves a truncated model behind.
async fn download_file(url: &str, dest: &Path, show_progress: bool) -> Result<()> {
    let client = reqwest::Client::new();
    let mut response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download {url}"))?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status {}: {}", response.status(), url);
    }

    let pb = if show_progress {
        Some(progress_bar(response.content_length())?)
    } else {
        None
    };

    let mut bytes = Vec::with_capacity(response.content_length().unwrap_or(0) as usize);
    while let Some(chunk) = response
        .chunk()
        .await
        .context("Failed to read response body")?
    {
        bytes.extend_from_slice(&chunk);
        if let Some(ref pb) = pb {
            pb.set_position(bytes.len() as u64);
        }
    }

    let partial = dest.with_extension("part");
    tokio::fs::write(&partial, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", partial.display()))?;
    tokio::fs::rename(&partial, dest)
        .await
        .with_context(|| format!("Failed to move download into {}", dest.display()))?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    info!("Downloaded {} to {}", url, dest.display());
    Ok(())
}
