use crate::error::ServerError;
use axum::extract::FromRequest;

/// `axum::Json` whose rejections render as the usual 422 `errors` body
/// instead of axum's plain-text message.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ValidJson<T>(pub T);
