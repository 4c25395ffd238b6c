use crate::error::Result;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use tracing::instrument;

#[instrument(name = "health", skip(state))]
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>> {
	state.db.ping().await?;
	Ok(Json(json!({
		"status": "ok",
		"timestamp": chrono::Utc::now().to_rfc3339(),
		"database": "connected",
	})))
}
