//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Message rendered for every store failure; details go to the log only.
pub const SERVER_ERROR: &str = "Server error.";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("not implemented: {0}")]
  NotImplemented(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store(error: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(error))
  }
}

impl From<campus_core::Error> for ApiError {
  fn from(error: campus_core::Error) -> Self {
    match error {
      campus_core::Error::Validation(message) => Self::BadRequest(message),
      other => Self::store(other),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::NotImplemented(m) => (StatusCode::NOT_IMPLEMENTED, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR.to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
