use axum::Json;
use serde_json::{json, Value};

/// Liveness probe. Success means "process is up", nothing more.
pub async fn healthz() -> Json<Value> {
    Json(json!({ "ok": true }))
}
