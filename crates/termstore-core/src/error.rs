//! Error types for `termstore-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("malformed entity id: {0:?}")]
  MalformedEntityId(String),

  #[error("entity id {got:?} is not {expected}")]
  WrongEntityKind { expected: &'static str, got: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
