use anyhow::Context;
use clap::Parser;
use life_calendar::{DatabaseConfig, LifeCalendarDb};
use life_calendar_server::{app, AppState};
use nest::config::Config;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	dotenv::dotenv().ok();

	let config = Config::parse();
	nest::init_tracing(&config);

	let db_config = DatabaseConfig {
		max_connections: Some(config.max_connections),
		acquire_timeout: Some(Duration::from_secs(config.connection_timeout)),
		..DatabaseConfig::new(config.database_url.clone())
	};
	let db = LifeCalendarDb::connect(&db_config).await.with_context(|| format!("could not connect to {}", config.database_url))?;
	db.initialize_schema().await.context("could not initialize schema")?;

	let router = app(AppState::new(db.clone(), config.clone()));
	nest::http::serve(&config, router).await?;

	db.close().await;
	Ok(())
}
