pub mod health;

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;

use crate::generation::handlers;
use crate::render::handlers::handle_generate_pdf;
use crate::state::AppState;

/// Last-resort response for a handler that panicked. The process keeps serving.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!("Handler panicked: {detail}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "An internal server error occurred" })),
    )
        .into_response()
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.body_limit_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/test", get(health::test_handler))
        // AI generation
        .route("/ai/generate-summary", post(handlers::handle_generate_summary))
        .route("/ai/generate-bullets", post(handlers::handle_generate_bullets))
        .route("/ai/improve-text", post(handlers::handle_improve_text))
        .route("/ai/suggest-skills", post(handlers::handle_suggest_skills))
        // PDF rendering
        .route("/generate-pdf", post(handle_generate_pdf))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}
