use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::http::{Response, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use std::borrow::Cow;
use std::collections::HashMap;

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("authentication required")]
	Unauthorized,

	#[error("{0} not found")]
	NotFound(&'static str),

	#[error("error in the request body")]
	UnprocessableEntity { errors: HashMap<Cow<'static, str>, Vec<Cow<'static, str>>> },

	#[error("{0}")]
	QuotaExceeded(String),

	#[error("an internal server error occurred")]
	Anyhow(#[from] anyhow::Error),

	#[error("an error occurred with the database")]
	Sqlx(#[from] sqlx::Error),
}

impl Error {
	pub fn unprocessable_entity<K, V>(errors: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<Cow<'static, str>>,
		V: Into<Cow<'static, str>>,
	{
		let mut error_map = HashMap::new();

		for (key, val) in errors {
			error_map.entry(key.into()).or_insert_with(Vec::new).push(val.into());
		}

		Self::UnprocessableEntity { errors: error_map }
	}

	pub const fn status_code(&self) -> StatusCode {
		match self {
			Self::Unauthorized => StatusCode::UNAUTHORIZED,
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
			Self::QuotaExceeded(_) => StatusCode::CONFLICT,
			Self::Anyhow(_) | Self::Sqlx(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<garde::Report> for Error {
	fn from(report: garde::Report) -> Self {
		Self::unprocessable_entity(report.iter().map(|(path, error)| {
			let field = path.to_string();
			let field = if field.is_empty() { "body".to_string() } else { field };
			(field, error.message().to_string())
		}))
	}
}

/// A body axum could not read as the expected JSON shape is reported like
/// any other invalid input.
impl From<JsonRejection> for Error {
	fn from(rejection: JsonRejection) -> Self {
		Self::unprocessable_entity([("body", rejection.body_text())])
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> Response<Body> {
		match self {
			Self::UnprocessableEntity { errors } => {
				#[derive(serde::Serialize)]
				struct Errors {
					errors: HashMap<Cow<'static, str>, Vec<Cow<'static, str>>>,
				}

				(StatusCode::UNPROCESSABLE_ENTITY, Json(Errors { errors })).into_response()
			}
			Self::Anyhow(ref e) => {
				tracing::error!("Generic error: {:?}", e);
				(self.status_code(), self.to_string()).into_response()
			}
			Self::Sqlx(ref e) => {
				tracing::error!("SQLx error: {:?}", e);
				(self.status_code(), self.to_string()).into_response()
			}
			// All other errors fall back
			_ => (self.status_code(), self.to_string()).into_response(),
		}
	}
}
