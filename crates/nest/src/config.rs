use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Parser, Clone, Debug, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Config {
	/// Use JSON formatting for tracing
	#[arg(long, env = "LOG_JSON", default_value = "false")]
	pub log_json: bool,

	/// Log filter, e.g. `life_calendar=debug,tower_http=info`
	#[arg(long, env = "RUST_LOG")]
	pub rust_log: Option<String>,

	/// Server host
	#[arg(long, env = "HOST", default_value = "127.0.0.1")]
	pub host: String,

	/// Server port
	#[arg(long, env = "PORT", default_value = "5000")]
	pub port: u16,

	/// SQLite database url
	#[arg(long, env = "DATABASE_URL", default_value = "sqlite://life_calendar.db")]
	pub database_url: String,

	/// Maximum pooled database connections
	#[arg(long, env = "MAX_CONNECTIONS", default_value = "5")]
	pub max_connections: u32,

	/// Database connection timeout in seconds
	#[arg(long, env = "CONNECTION_TIMEOUT", default_value = "30")]
	pub connection_timeout: u64,

	/// Enable CORS
	#[arg(long, env = "ENABLE_CORS")]
	pub enable_cors: bool,

	/// Years added to the current age once a user has outlived the estimate
	#[arg(long, env = "OUTLIVED_MARGIN_YEARS", default_value = "2.0")]
	pub outlived_margin_years: f64,
}

impl Config {
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_flags_override_defaults() {
		let config = Config::parse_from(["life_calendar", "--host", "0.0.0.0", "--port", "8081", "--database-url", "sqlite::memory:", "--outlived-margin-years", "5"]);

		assert_eq!(config.bind_address(), "0.0.0.0:8081");
		assert_eq!(config.database_url, "sqlite::memory:");
		assert!((config.outlived_margin_years - 5.0).abs() < f64::EPSILON);
	}
}
