use crate::error::Result;
use crate::store::calendar_repository::CalendarRepository;
use crate::store::schema;
use crate::store::week_store::WeekStore;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
	pub database_url: String,
	pub max_connections: Option<u32>,
	pub min_connections: Option<u32>,
	pub acquire_timeout: Option<Duration>,
	pub idle_timeout: Option<Duration>,
	/// How long a writer waits for the database lock before giving up.
	pub busy_timeout: Duration,
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self {
			database_url: "sqlite::memory:".to_string(),
			max_connections: Some(5),
			min_connections: Some(1),
			acquire_timeout: Some(Duration::from_secs(30)),
			idle_timeout: Some(Duration::from_secs(600)),
			busy_timeout: Duration::from_secs(5),
		}
	}
}

impl DatabaseConfig {
	pub fn new(database_url: impl Into<String>) -> Self {
		Self {
			database_url: database_url.into(),
			..Self::default()
		}
	}

	pub fn is_in_memory(&self) -> bool {
		self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
	}
}

/// Connection pool plus the two stores built on it.
#[derive(Debug, Clone)]
pub struct LifeCalendarDb {
	pool: SqlitePool,
}

impl LifeCalendarDb {
	pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
		let options = SqliteConnectOptions::from_str(&config.database_url)?
			.create_if_missing(true)
			.foreign_keys(true)
			.busy_timeout(config.busy_timeout);

		// An in-memory database lives and dies with its connections, so keep
		// exactly one open for the lifetime of the pool.
		let pool = if config.is_in_memory() {
			SqlitePoolOptions::new()
				.max_connections(1)
				.min_connections(1)
				.idle_timeout(None)
				.max_lifetime(None)
				.connect_with(options)
				.await?
		} else {
			// WAL lets readers proceed while a write transaction holds the lock.
			let options = options.journal_mode(SqliteJournalMode::Wal);
			SqlitePoolOptions::new()
				.max_connections(config.max_connections.unwrap_or(5))
				.min_connections(config.min_connections.unwrap_or(1))
				.acquire_timeout(config.acquire_timeout.unwrap_or(Duration::from_secs(30)))
				.idle_timeout(config.idle_timeout)
				.connect_with(options)
				.await?
		};

		info!(url = %config.database_url, "database connected");
		Ok(Self { pool })
	}

	/// Creates tables, indexes and the quota trigger. Safe to run on every start.
	pub async fn initialize_schema(&self) -> Result<()> {
		schema::init_schema(&self.pool).await?;
		Ok(())
	}

	pub fn calendars(&self) -> CalendarRepository {
		CalendarRepository::new(self.pool.clone())
	}

	pub fn weeks(&self) -> WeekStore {
		WeekStore::new(self.pool.clone())
	}

	pub const fn pool(&self) -> &SqlitePool {
		&self.pool
	}

	pub async fn ping(&self) -> Result<()> {
		sqlx::query("SELECT 1").execute(&self.pool).await?;
		Ok(())
	}

	pub async fn close(&self) {
		self.pool.close().await;
	}
}
