//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler. Every variant renders as
/// `{"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("unauthorized: {0}")]
  Unauthorized(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  /// Logged, then reported to the client without detail.
  #[error("internal error: {0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn internal(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Internal(Box::new(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
      ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m),
      ApiError::Internal(e) => {
        tracing::error!(error = %e, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

impl From<geektunes_core::Error> for ApiError {
  fn from(e: geektunes_core::Error) -> Self {
    use geektunes_core::Error as Core;
    match e {
      Core::InvalidArgument(m) => ApiError::BadRequest(m),
      Core::NotFound(m) => ApiError::NotFound(m),
      Core::Unauthorized(m) => ApiError::Unauthorized(m),
      Core::DuplicateKey(m) => ApiError::Conflict(m),
      Core::Storage(inner) => ApiError::Internal(inner),
      Core::Serialization(inner) => ApiError::internal(inner),
    }
  }
}

/// Map a backend error through the core taxonomy. Used as
/// `.map_err(store_err)` on every store call.
pub fn store_err<E: Into<geektunes_core::Error>>(e: E) -> ApiError { e.into().into() }

// Extractor rejections keep the JSON error shape.

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn core_errors_map_to_statuses() {
    let cases = [
      (geektunes_core::Error::invalid("x"), StatusCode::BAD_REQUEST),
      (geektunes_core::Error::NotFound("x".into()), StatusCode::NOT_FOUND),
      (geektunes_core::Error::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
      (geektunes_core::Error::DuplicateKey("x".into()), StatusCode::CONFLICT),
    ];
    for (err, status) in cases {
      assert_eq!(ApiError::from(err).into_response().status(), status);
    }
  }

  #[tokio::test]
  async fn internal_detail_is_hidden() {
    let err = store_err(geektunes_core::Error::Storage("disk on fire".into()));
    let resp = err.into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "internal server error");
  }
}
