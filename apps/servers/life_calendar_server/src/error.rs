use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use life_calendar::StoreError;
use nest::http::Error as NestError;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error(transparent)]
	NestError(#[from] NestError),

	#[error(transparent)]
	Store(#[from] StoreError),
}

impl From<JsonRejection> for ServerError {
	fn from(rejection: JsonRejection) -> Self {
		Self::NestError(NestError::from(rejection))
	}
}

impl From<garde::Report> for ServerError {
	fn from(report: garde::Report) -> Self {
		Self::NestError(NestError::from(report))
	}
}

/// Maps store failures onto HTTP semantics. A rolled back cascade is
/// reported as a plain server error; the client may retry it.
fn store_to_http(err: StoreError) -> NestError {
	match err {
		StoreError::NotFound { entity } => NestError::NotFound(entity),
		StoreError::QuotaExceeded { limit } => NestError::QuotaExceeded(format!("You can keep at most {limit} calendars. Delete one before creating another.")),
		StoreError::ConflictDuringCascade(e) => NestError::Anyhow(anyhow::Error::new(e).context("calendar deletion rolled back")),
		StoreError::Database(e) => NestError::Sqlx(e),
		other => NestError::Anyhow(anyhow::Error::new(other)),
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		match self {
			Self::NestError(err) => err.into_response(),
			Self::Store(err) => store_to_http(err).into_response(),
		}
	}
}

pub type Result<T, E = ServerError> = std::result::Result<T, E>;
