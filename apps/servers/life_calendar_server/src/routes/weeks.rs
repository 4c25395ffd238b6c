use crate::handlers::weeks as handlers;
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;

pub fn routes() -> Router<AppState> {
	Router::new()
		.route("/api/events/calendar/:calendar_id", get(handlers::list))
		.route(
			"/api/events/calendar/:calendar_id/week/:week_index",
			get(handlers::get).put(handlers::put).delete(handlers::delete),
		)
		.route("/api/events/calendar/:calendar_id/date/:date", post(handlers::add_on_date))
}
