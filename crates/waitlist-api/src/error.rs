//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use waitlist_core::store::{FailureKind, StoreFailure};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error returned by the waitlist service.
///
/// The `Display` text is what the caller sees in `{"error": ...}`; the boxed
/// source, when present, is only logged.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Bad input; the caller may fix it and resubmit.
  #[error("{0}")]
  Validation(String),

  #[error("Email already exists in waitlist")]
  Conflict(#[source] BoxError),

  /// The backing store is unreachable; the caller may retry later.
  #[error("Database connection failed")]
  ServiceUnavailable(#[source] BoxError),

  #[error("Internal server error")]
  Internal(#[source] BoxError),
}

impl ApiError {
  /// Classify a store failure into the matching API outcome.
  pub fn from_store<E>(err: E) -> Self
  where
    E: std::error::Error + StoreFailure + Send + Sync + 'static,
  {
    match err.kind() {
      FailureKind::DuplicateKey => ApiError::Conflict(Box::new(err)),
      FailureKind::Unavailable => ApiError::ServiceUnavailable(Box::new(err)),
      FailureKind::Other => ApiError::Internal(Box::new(err)),
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<waitlist_core::Error> for ApiError {
  fn from(err: waitlist_core::Error) -> Self { ApiError::Validation(err.to_string()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match &self {
      ApiError::Validation(msg) => tracing::debug!(%msg, "rejected submission"),
      ApiError::Conflict(e) => tracing::warn!(error = %e, "duplicate waitlist email"),
      ApiError::ServiceUnavailable(e) => {
        tracing::warn!(error = %e, "waitlist store unavailable")
      }
      ApiError::Internal(e) => tracing::error!(error = ?e, "waitlist request failed"),
    }
    (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
  }
}
