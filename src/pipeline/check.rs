// Check pipeline: upload -> validate -> extract -> snapshot corpus -> score -> store -> log.
//
// The upload is validated (size, then file type) before anything is
// written or scored. The corpus snapshot excludes the upload's identifier,
// so a re-upload never matches its earlier copy. Unless this is a dry run,
// the upload is stored once scoring succeeds and joins the corpus for every
// later check.

use tracing::{info, warn};

use crate::corpus::extract::{check_extension, extract_bytes, sanitize_filename};
use crate::corpus::{CorpusStore, Upload};
use crate::db::{NewLogEntry, ResultLog};
use crate::error::CheckError;
use crate::report::{CheckReport, Engine};
use crate::text::document::{Document, DocumentMetadata};

/// Default upload size limit (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Per-request switches for a check.
#[derive(Debug, Clone, Copy)]
pub struct CheckOptions {
    /// Score without adding the upload to the corpus
    pub dry_run: bool,
    pub max_upload_bytes: u64,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Reject oversize or unreadable uploads and return the corpus identifier
/// the upload will be known by.
pub fn validate_upload(upload: &Upload, max_upload_bytes: u64) -> Result<String, CheckError> {
    if upload.filename.trim().is_empty() {
        return Err(CheckError::InvalidRequest("no file selected".to_string()));
    }
    let size = upload.size_bytes();
    if size > max_upload_bytes {
        return Err(CheckError::DocumentTooLarge {
            size,
            limit: max_upload_bytes,
        });
    }
    check_extension(&upload.filename)?;
    sanitize_filename(&upload.filename).ok_or_else(|| {
        CheckError::InvalidRequest(format!("'{}' is not a usable file name", upload.filename))
    })
}

/// Run a one-vs-corpus check for an upload.
pub async fn run(
    engine: &Engine,
    store: &dyn CorpusStore,
    log: &dyn ResultLog,
    upload: &Upload,
    options: CheckOptions,
) -> Result<CheckReport, CheckError> {
    let id = validate_upload(upload, options.max_upload_bytes)?;
    let paragraphs = extract_bytes(&id, &upload.contents)?;
    let document = Document::new(id.clone(), paragraphs);

    let corpus = store.list_documents(Some(&id)).await?;
    info!(document = %id, corpus = corpus.len(), dry_run = options.dry_run, "Checking upload");

    let metadata = DocumentMetadata::for_upload(&document, upload.size_bytes());
    let report = engine.check(&document, metadata, &corpus).await?;

    // Only a successfully scored upload joins the corpus
    if !options.dry_run {
        store.add_document(&id, &upload.contents).await?;
    }

    // Logging is best-effort; a failed write never fails the check
    let entry = NewLogEntry::now(&id, report.lexical_score, report.semantic_score);
    if let Err(e) = log.append(&entry).await {
        warn!(document = %id, error = %e, "Failed to log check result");
    }

    Ok(report)
}
