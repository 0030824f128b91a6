use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and which backends are active.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let backend = |configured: bool, name: &'static str| if configured { name } else { "memory" };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "career-api",
        "store": backend(state.config.database_url.is_some(), "postgres"),
        "inference_cache": backend(state.config.redis_url.is_some(), "redis"),
        "llm_enabled": state.llm.is_some(),
    }))
}
