use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
	/// Absent, or owned by somebody else.
	#[error("{entity} not found")]
	NotFound { entity: &'static str },

	#[error("an owner may keep at most {limit} calendars")]
	QuotaExceeded { limit: i64 },

	/// The cascade delete was rolled back; retrying is safe.
	#[error("calendar deletion aborted and rolled back: {0}")]
	ConflictDuringCascade(#[source] sqlx::Error),

	#[error("Database error: {0}")]
	Database(#[from] sqlx::Error),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("stored integer out of range: {0}")]
	IntegerConversion(#[from] std::num::TryFromIntError),
}

impl StoreError {
	pub const fn calendar_not_found() -> Self {
		Self::NotFound { entity: "calendar" }
	}

	pub const fn week_not_found() -> Self {
		Self::NotFound { entity: "week" }
	}
}

pub type Result<T> = std::result::Result<T, StoreError>;
