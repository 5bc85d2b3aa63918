//! SQLite backend for the term store.
//!
//! Terms are normalized into three shared pools (`text`, `text_in_lang`,
//! `term_in_lang`) and linked to entities through one link table per entity
//! kind. Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime.

mod assemble;
mod pool;
mod schema;
mod store;

pub mod error;
pub mod tables;

pub use error::{Error, Result};
pub use store::{
  PoolSizes, SqliteEntityTermStore, SqliteItemTermStore, SqlitePropertyTermStore,
  SqliteTermStore,
};
pub use tables::{LinkTable, TableNames};
