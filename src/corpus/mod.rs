// Corpus access: text extraction from uploads and the document store.

pub mod extract;
pub mod store;

use std::path::Path;

use anyhow::{Context, Result};

pub use store::{CorpusStore, DirectoryStore};

/// A file handed to the system for checking, before extraction.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Client-supplied file name (sanitised before storage)
    pub filename: String,
    pub contents: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            contents: contents.into(),
        }
    }

    /// Read a local file as an upload, named by its file name.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("{} has no usable file name", path.display()))?
            .to_string();
        Ok(Self { filename, contents })
    }

    pub fn size_bytes(&self) -> u64 {
        self.contents.len() as u64
    }
}
