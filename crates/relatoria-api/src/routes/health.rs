use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "RelatorIA API is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "api",
        "env": state.environment,
    }))
}
