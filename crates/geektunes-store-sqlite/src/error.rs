//! Error type for `geektunes-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] geektunes_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown {column} value: {value:?}")]
  UnknownVariant { column: &'static str, value: String },

  /// A UNIQUE constraint rejected the write.
  #[error("duplicate: {0}")]
  Duplicate(String),
}

impl Error {
  /// Turn a UNIQUE or PRIMARY KEY violation into [`Error::Duplicate`] with
  /// `msg`; any other database error passes through unchanged.
  pub(crate) fn or_duplicate(e: tokio_rusqlite::Error, msg: impl FnOnce() -> String) -> Self {
    let is_unique = matches!(
      &e,
      tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _))
        if f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
          || f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    );
    if is_unique { Error::Duplicate(msg()) } else { Error::Database(e) }
  }
}

impl From<Error> for geektunes_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Core(inner) => inner,
      Error::Duplicate(msg) => geektunes_core::Error::DuplicateKey(msg),
      other => geektunes_core::Error::Storage(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
