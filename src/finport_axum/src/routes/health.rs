use axum::{Json, response::IntoResponse};
use chrono::Utc;

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn root() -> &'static str {
    "FinPort backend running"
}
