// POST /api/compare: one-vs-one comparison of two stored documents.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::pipeline::compare;
use crate::web::{check_error_response, json_rejection_response, AppState};

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub assignment1: String,
    pub assignment2: String,
}

pub async fn compare_assignments(
    State(state): State<AppState>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(rejection),
    };
    match compare::run(
        &state.engine,
        state.store.as_ref(),
        &request.assignment1,
        &request.assignment2,
    )
    .await
    {
        Ok(report) => Json(report).into_response(),
        Err(e) => check_error_response(&e),
    }
}
