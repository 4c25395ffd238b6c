use crate::error::ServerError;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use life_calendar::OwnerId;
use nest::http::Error as NestError;

/// Header set by the authenticating gateway in front of this service.
pub const OWNER_HEADER: &str = "x-owner-id";

/// The authenticated caller. Requests without an owner header are rejected
/// with 401 before any handler runs.
#[derive(Debug, Clone)]
pub struct Owner(pub OwnerId);

#[async_trait]
impl<S> FromRequestParts<S> for Owner
where
	S: Send + Sync,
{
	type Rejection = ServerError;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		parts
			.headers
			.get(OWNER_HEADER)
			.and_then(|value| value.to_str().ok())
			.map(str::trim)
			.filter(|id| !id.is_empty())
			.map(|id| Self(OwnerId::new(id)))
			.ok_or(ServerError::NestError(NestError::Unauthorized))
	}
}
