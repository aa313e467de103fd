// Web server: Axum JSON API in front of the check and compare pipelines.
//
// All routes serve JSON. Errors are `{"error": "..."}` with a status code
// derived from the CheckError variant, so clients can tell a bad upload
// (4xx) from an encoder or storage outage (503).

use std::sync::Arc;

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::corpus::CorpusStore;
use crate::db::ResultLog;
use crate::error::CheckError;
use crate::report::Engine;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Engine,
    pub store: Arc<dyn CorpusStore>,
    pub log: Arc<dyn ResultLog>,
    pub config: Arc<Config>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(state: AppState, port: u16, bind: &str) -> Result<()> {
    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("draftcheck listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    // JSON escaping can inflate text; the byte limit proper is enforced
    // by the check pipeline on the decoded content
    let body_limit = usize::try_from(state.config.max_upload_bytes)
        .unwrap_or(usize::MAX)
        .saturating_mul(2)
        .max(1024 * 1024);

    Router::new()
        .route("/health", get(health))
        .route("/api/assignments", get(handlers::assignments::list_assignments))
        .route("/api/check", post(handlers::check::check_upload))
        .route("/api/compare", post(handlers::compare::compare_assignments))
        .route("/api/history", get(handlers::history::list_history))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check, always 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}

/// HTTP status for a core error.
pub fn status_for(err: &CheckError) -> StatusCode {
    match err {
        CheckError::DocumentNotFound(_) => StatusCode::NOT_FOUND,
        e if e.is_client_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Map a core error to its JSON response.
pub fn check_error_response(err: &CheckError) -> Response {
    let status = status_for(err);
    if status.is_server_error() {
        tracing::error!(error = %err, "Request failed");
    }
    api_error(status, &err.to_string())
}

/// A body that failed to parse as the expected JSON request.
pub fn json_rejection_response(rejection: JsonRejection) -> Response {
    api_error(StatusCode::BAD_REQUEST, &rejection.body_text())
}
