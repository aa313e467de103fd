// Compare pipeline: two stored documents, scored against each other only.

use crate::corpus::CorpusStore;
use crate::error::CheckError;
use crate::report::{CompareReport, Engine};

/// Run a one-vs-one comparison between two documents already in the corpus.
pub async fn run(
    engine: &Engine,
    store: &dyn CorpusStore,
    first_id: &str,
    second_id: &str,
) -> Result<CompareReport, CheckError> {
    if first_id.trim().is_empty() || second_id.trim().is_empty() {
        return Err(CheckError::InvalidRequest(
            "two documents must be selected".to_string(),
        ));
    }
    if first_id == second_id {
        return Err(CheckError::InvalidRequest(
            "a document cannot be compared with itself".to_string(),
        ));
    }

    let first = store.get_document(first_id).await?;
    let second = store.get_document(second_id).await?;
    let first_meta = store.document_metadata(first_id).await?;
    let second_meta = store.document_metadata(second_id).await?;

    engine
        .compare((&first, first_meta), (&second, second_meta))
        .await
}
