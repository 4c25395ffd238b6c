use crate::config::Config;
use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Adds request tracing and, when enabled, a permissive CORS layer.
pub fn with_layers(config: &Config, app: Router) -> Router {
	let app = if config.enable_cors {
		app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
	} else {
		app
	};

	// Enables logging. Use `RUST_LOG=tower_http=debug`
	app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

pub async fn serve(config: &Config, app: Router) -> anyhow::Result<()> {
	let app = with_layers(config, app);

	let address = config.bind_address();
	let listener = TcpListener::bind(&address).await.with_context(|| format!("could not bind {address}"))?;
	tracing::info!("listening on {}", listener.local_addr()?);
	axum::serve(listener, app).await?;
	Ok(())
}
