// Corpus store: the set of previously submitted documents.
//
// The engine only ever reads a snapshot from here; uploads are the one
// writer. There is no locking: a document added while a check is running
// may or may not be part of that check's snapshot.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::extract::{extract_bytes, is_supported, sanitize_filename};
use crate::error::CheckError;
use crate::text::document::{Document, DocumentMetadata};

/// Backend-agnostic access to the corpus.
#[async_trait]
pub trait CorpusStore: Send + Sync {
    /// Identifiers of every stored document, sorted.
    async fn list_ids(&self) -> Result<Vec<String>, CheckError>;

    /// Every readable, non-empty document except `exclude`.
    async fn list_documents(&self, exclude: Option<&str>) -> Result<Vec<Document>, CheckError>;

    /// A single document; `DocumentNotFound` if it isn't stored.
    async fn get_document(&self, id: &str) -> Result<Document, CheckError>;

    /// Store a document under a sanitised form of `filename` (overwriting any
    /// previous document with that identifier). Returns the identifier used.
    async fn add_document(&self, filename: &str, contents: &[u8]) -> Result<String, CheckError>;

    /// Size, word count and modification time of a stored document.
    async fn document_metadata(&self, id: &str) -> Result<DocumentMetadata, CheckError>;
}

/// One file per document in a flat directory.
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the backing directory if needed.
    pub async fn ensure_exists(&self) -> Result<(), CheckError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| unavailable(&self.root, e))
    }

    /// Resolve an identifier to a path inside the root, refusing anything
    /// that is not a single plain file name. Names written into the
    /// directory by hand ("My Essay.txt") resolve as they are listed.
    fn path_for(&self, id: &str) -> Result<PathBuf, CheckError> {
        let mut components = Path::new(id).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if !id.contains('\\') => {
                Ok(self.root.join(name))
            }
            _ => Err(CheckError::DocumentNotFound(id.to_string())),
        }
    }
}

fn unavailable(path: &Path, err: std::io::Error) -> CheckError {
    CheckError::CorpusUnavailable(format!("{}: {err}", path.display()))
}

#[async_trait]
impl CorpusStore for DirectoryStore {
    async fn list_ids(&self) -> Result<Vec<String>, CheckError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            // Nothing uploaded yet
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(unavailable(&self.root, e)),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| unavailable(&self.root, e))?
        {
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                ids.push(name.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    async fn list_documents(&self, exclude: Option<&str>) -> Result<Vec<Document>, CheckError> {
        let mut documents = Vec::new();
        for id in self.list_ids().await? {
            if exclude == Some(id.as_str()) {
                continue;
            }
            if !is_supported(&id) {
                debug!(id = %id, "Skipping unsupported corpus file");
                continue;
            }
            match self.get_document(&id).await {
                Ok(doc) => documents.push(doc),
                Err(CheckError::EmptyDocument) => {
                    debug!(id = %id, "Skipping empty corpus file");
                }
                Err(CheckError::CorpusUnavailable(reason)) => {
                    warn!(id = %id, reason = %reason, "Skipping unreadable corpus file");
                }
                // Removed after it was listed
                Err(CheckError::DocumentNotFound(_)) => {
                    warn!(id = %id, "Skipping corpus file that disappeared");
                }
                Err(e) => return Err(e),
            }
        }
        debug!(documents = documents.len(), "Loaded corpus snapshot");
        Ok(documents)
    }

    async fn get_document(&self, id: &str) -> Result<Document, CheckError> {
        let path = self.path_for(id)?;
        let contents = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CheckError::DocumentNotFound(id.to_string()))
            }
            Err(e) => return Err(unavailable(&path, e)),
        };
        let paragraphs = extract_bytes(id, &contents)?;
        Ok(Document::new(id, paragraphs))
    }

    async fn add_document(&self, filename: &str, contents: &[u8]) -> Result<String, CheckError> {
        let id = sanitize_filename(filename).ok_or_else(|| {
            CheckError::InvalidRequest(format!("'{filename}' is not a usable file name"))
        })?;
        self.ensure_exists().await?;
        let path = self.root.join(&id);
        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| unavailable(&path, e))?;
        debug!(id = %id, bytes = contents.len(), "Stored document in corpus");
        Ok(id)
    }

    async fn document_metadata(&self, id: &str) -> Result<DocumentMetadata, CheckError> {
        let path = self.path_for(id)?;
        let meta = match tokio::fs::metadata(&path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CheckError::DocumentNotFound(id.to_string()))
            }
            Err(e) => return Err(unavailable(&path, e)),
        };
        let document = self.get_document(id).await?;
        let submitted_at = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        Ok(DocumentMetadata {
            identifier: id.to_string(),
            size_bytes: meta.len(),
            word_count: document.word_count(),
            submitted_at,
        })
    }
}
