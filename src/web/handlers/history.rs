// GET /api/history?limit=N: most recent logged checks, newest first.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::web::{api_error, AppState};

#[derive(Deserialize, Default)]
pub struct HistoryQuery {
    /// Entries to return (default 20, max 500)
    pub limit: Option<u32>,
}

pub async fn list_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Response {
    let limit = params.limit.unwrap_or(20).min(500);
    match state.log.recent(limit).await {
        Ok(entries) => Json(serde_json::json!({
            "results": entries,
            "limit": limit,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "DB error fetching history");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}
