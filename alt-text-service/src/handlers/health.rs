use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub const LIVENESS_MESSAGE: &str = "Alt-text generator backend is running!";

/// `GET /`: plain-text liveness message.
pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

/// `GET /health`: JSON probe for container orchestrators.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "alt-text-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}
