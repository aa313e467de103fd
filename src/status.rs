// System status display: database stats, corpus size, encoder availability.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::corpus::CorpusStore;
use crate::db::ResultLog;
use crate::model::download;
use crate::output::format_bytes;

/// Display system status to the terminal. `log` is None when the database
/// hasn't been initialized yet.
pub async fn show(
    config: &Config,
    store: &dyn CorpusStore,
    log: Option<&dyn ResultLog>,
) -> Result<()> {
    match log {
        Some(log) => {
            let file_size = std::fs::metadata(&config.db_path)
                .map(|m| format_bytes(m.len()))
                .unwrap_or_else(|_| "unknown".to_string());
            println!("Database: {} ({})", config.db_path, file_size);
            println!("Checks logged: {}", log.count().await?);
        }
        None => {
            println!("Database: not initialized");
            println!("  Run `draftcheck init` to set up the database.");
        }
    }

    match store.list_ids().await {
        Ok(ids) => println!(
            "Corpus: {} documents in {}",
            ids.len(),
            config.corpus_dir.display()
        ),
        Err(e) => println!("Corpus: unavailable ({e})"),
    }

    if download::encoder_files_present(&config.model_dir) {
        println!(
            "Encoder: {} ({})",
            download::ENCODER_MODEL_NAME,
            download::encoder_model_dir(&config.model_dir).display()
        );
    } else {
        println!("Encoder: not downloaded");
        println!("  Run `draftcheck download-model` to fetch it.");
    }

    Ok(())
}

/// True when the database file exists on disk.
pub fn database_exists(db_path: &str) -> bool {
    Path::new(db_path).exists()
}
