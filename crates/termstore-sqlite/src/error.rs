//! Error type for `termstore-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Any failure of the underlying database. The only error a term store
  /// operation returns.
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// Table name prefixes may only contain ASCII letters, digits and `_`.
  #[error("invalid table name prefix: {0:?}")]
  InvalidPrefix(String),
}

impl Error {
  /// The SQLite result code behind a [`Error::Database`], if there is one.
  pub fn sqlite_code(&self) -> Option<rusqlite::ErrorCode> {
    match self {
      Error::Database(tokio_rusqlite::Error::Rusqlite(e)) => e.sqlite_error_code(),
      Error::Database(tokio_rusqlite::Error::Close((_, e))) => e.sqlite_error_code(),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
