//! HTTP surface of the life calendar: estimate previews, calendar lifecycle
//! and week annotations. Authentication happens upstream; handlers only see
//! the owner id it forwards.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod identity;
pub mod models;
pub mod routes;

pub use error::ServerError;

use axum::Router;
use life_calendar::LifeCalendarDb;
use nest::config::Config;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
	pub db: LifeCalendarDb,
	pub config: Arc<Config>,
}

impl AppState {
	pub fn new(db: LifeCalendarDb, config: Config) -> Self {
		Self { db, config: Arc::new(config) }
	}
}

/// All routes with state applied, without the tracing/CORS layers that
/// `nest::http::serve` adds.
pub fn app(state: AppState) -> Router {
	Router::new()
		.merge(routes::health::routes())
		.merge(routes::estimate::routes())
		.merge(routes::calendars::routes())
		.merge(routes::weeks::routes())
		.with_state(state)
}
