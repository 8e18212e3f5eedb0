use axum::response::Json;
use serde_json::{Value, json};

/// Liveness probe for the dashboard.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
