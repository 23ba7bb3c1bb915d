// Connection-status endpoint polled by the browser UI

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};
use tracing::debug;

use crate::web::AppState;

/// Report whether the MongoDB deployment is currently reachable.
/// Always answers 200; the body carries the state.
pub async fn get_health(State(state): State<AppState>) -> Json<Value> {
    match state.store.ping().await {
        Ok(()) => Json(json!({ "status": "connected" })),
        Err(e) => {
            debug!("Health ping failed: {}", e);
            Json(json!({ "status": "disconnected" }))
        }
    }
}
