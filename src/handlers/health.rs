use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{error::Result, state::AppState};

/// Liveness probe; fails with 503 when the database does not answer.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>> {
    state.db.ping().await?;
    Ok(Json(json!({ "status": "ok" })))
}
