use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// POST endpoints advertised by GET /test.
pub const ENDPOINTS: &[&str] = &[
    "/ai/generate-summary",
    "/ai/generate-bullets",
    "/ai/improve-text",
    "/ai/suggest-skills",
    "/generate-pdf",
];

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "Resume Builder",
        "port": state.config.port
    }))
}

/// GET /test
/// Liveness plus a list of the endpoints this service exposes.
pub async fn test_handler() -> Json<Value> {
    tracing::info!("Test endpoint called");
    Json(json!({
        "message": "Server is running!",
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "ai": "DeepSeek",
        "endpoints": ENDPOINTS
    }))
}
