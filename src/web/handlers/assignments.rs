// GET /api/assignments: identifiers of every document in the corpus.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::web::{check_error_response, AppState};

pub async fn list_assignments(State(state): State<AppState>) -> Response {
    match state.store.list_ids().await {
        Ok(ids) => Json(serde_json::json!({
            "assignments": ids,
            "total": ids.len(),
        }))
        .into_response(),
        Err(e) => check_error_response(&e),
    }
}
