use crate::handlers::estimate as handlers;
use crate::AppState;
use axum::routing::post;
use axum::Router;

pub fn routes() -> Router<AppState> {
	Router::new().route("/api/estimate", post(handlers::estimate))
}
