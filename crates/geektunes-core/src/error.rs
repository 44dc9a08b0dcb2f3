//! Error taxonomy shared by every catalog backend.
//!
//! Backends keep their own error types and convert into this one, so the API
//! layer maps failures to HTTP statuses the same way for every store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Malformed input: blank search query, missing fields, bad references.
  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("unauthorized: {0}")]
  Unauthorized(String),

  /// A uniqueness constraint was violated (username, one like per pair).
  #[error("duplicate key: {0}")]
  DuplicateKey(String),

  /// Catch-all backing-store failure.
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  pub fn invalid(msg: impl Into<String>) -> Self {
    Self::InvalidArgument(msg.into())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
