use crate::handlers::calendars as handlers;
use crate::AppState;
use axum::routing::get;
use axum::Router;

pub fn routes() -> Router<AppState> {
	Router::new()
		.route("/api/calendar", get(handlers::list).post(handlers::create))
		.route("/api/calendar/:id", get(handlers::get).delete(handlers::delete))
}
