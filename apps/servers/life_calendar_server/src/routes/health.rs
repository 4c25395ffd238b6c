use crate::handlers::health as handlers;
use crate::AppState;
use axum::routing::get;
use axum::Router;

pub fn routes() -> Router<AppState> {
	Router::new().route("/api/health", get(handlers::health))
}
