// Error taxonomy for the similarity-and-consistency engine.
//
// Every variant is recoverable at the request boundary: the CLI prints it,
// the web server maps it to a status code. Division-by-zero situations
// (empty corpus, paragraphs without words) are not errors and never reach
// this type; they are defined as zero-valued results where they occur.

use thiserror::Error;

/// Errors surfaced by core operations and the collaborators around them.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The document has no extractable, non-blank text.
    #[error("no text could be extracted from the document")]
    EmptyDocument,

    /// The extraction collaborator does not handle this file type.
    #[error("unsupported file type '{extension}' (only .txt is accepted)")]
    UnsupportedFormat { extension: String },

    /// The semantic encoder failed to load or to run.
    #[error("sentence encoder unavailable: {0}")]
    EncoderUnavailable(String),

    /// The corpus store could not be read.
    #[error("corpus unavailable: {0}")]
    CorpusUnavailable(String),

    /// A one-vs-one comparison named a document that is not in the corpus.
    #[error("document '{0}' does not exist")]
    DocumentNotFound(String),

    /// An upload exceeded the configured size limit.
    #[error("file size {size} bytes exceeds the {limit} byte limit")]
    DocumentTooLarge { size: u64, limit: u64 },

    /// The request itself is malformed (e.g. comparing a document with itself).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl CheckError {
    /// True when the caller sent something we can't process, as opposed to
    /// a failure of the encoder or storage behind us.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CheckError::EmptyDocument
                | CheckError::UnsupportedFormat { .. }
                | CheckError::DocumentNotFound(_)
                | CheckError::DocumentTooLarge { .. }
                | CheckError::InvalidRequest(_)
        )
    }
}
