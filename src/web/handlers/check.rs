// POST /api/check: one-vs-corpus check of an uploaded text file.
//
// Body: {"filename": "essay.txt", "content": "...", "dry_run": false}
// With dry_run the upload is scored but not added to the corpus.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::corpus::Upload;
use crate::pipeline::{check, CheckOptions};
use crate::web::{check_error_response, json_rejection_response, AppState};

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub filename: String,
    pub content: String,
    #[serde(default)]
    pub dry_run: bool,
}

pub async fn check_upload(
    State(state): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(rejection),
    };
    let upload = Upload::new(request.filename, request.content);
    let options = CheckOptions {
        dry_run: request.dry_run,
        max_upload_bytes: state.config.max_upload_bytes,
    };

    match check::run(
        &state.engine,
        state.store.as_ref(),
        state.log.as_ref(),
        &upload,
        options,
    )
    .await
    {
        Ok(report) => Json(report).into_response(),
        Err(e) => check_error_response(&e),
    }
}
