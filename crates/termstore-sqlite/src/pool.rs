//! Acquire-or-insert over the three shared pools.
//!
//! Each acquire looks the row up, inserts it on a miss, and treats a UNIQUE
//! violation on insert as a concurrent writer having created the row first:
//! the lookup is re-run and the existing id returned. Only one extra insert
//! attempt is made before the conflict is surfaced.

use rusqlite::{Connection, ErrorCode, OptionalExtension as _, ffi, params};
use termstore_core::{Term, TermKind};

use crate::tables::TableNames;

/// The pools as seen through one connection (usually an open transaction).
pub struct Pools<'a> {
  conn:  &'a Connection,
  names: &'a TableNames,
}

impl<'a> Pools<'a> {
  pub fn new(conn: &'a Connection, names: &'a TableNames) -> Self { Self { conn, names } }

  /// Resolve `term` of `kind` to its `term_in_lang` id, creating any missing
  /// row along the text → text-in-language → term-in-language chain.
  pub fn acquire_typed_term_id(&self, kind: TermKind, term: &Term) -> rusqlite::Result<i64> {
    let text_id = self.acquire_text_id(&term.text)?;
    let text_in_lang_id = self.acquire_text_in_lang_id(&term.language, text_id)?;
    self.acquire_term_in_lang_id(kind, text_in_lang_id)
  }

  // ── text ──────────────────────────────────────────────────────────────

  pub fn acquire_text_id(&self, text: &str) -> rusqlite::Result<i64> {
    acquire(
      || self.find_text_id(text),
      || self.insert_text(text),
    )
  }

  fn find_text_id(&self, text: &str) -> rusqlite::Result<Option<i64>> {
    self
      .conn
      .prepare_cached(&format!("SELECT id FROM {} WHERE text = ?1", self.names.text()))?
      .query_row(params![text], |r| r.get(0))
      .optional()
  }

  fn insert_text(&self, text: &str) -> rusqlite::Result<i64> {
    self
      .conn
      .prepare_cached(&format!("INSERT INTO {} (text) VALUES (?1)", self.names.text()))?
      .insert(params![text])
  }

  // ── text_in_lang ──────────────────────────────────────────────────────

  pub fn acquire_text_in_lang_id(&self, language: &str, text_id: i64) -> rusqlite::Result<i64> {
    acquire(
      || self.find_text_in_lang_id(language, text_id),
      || self.insert_text_in_lang(language, text_id),
    )
  }

  fn find_text_in_lang_id(&self, language: &str, text_id: i64) -> rusqlite::Result<Option<i64>> {
    self
      .conn
      .prepare_cached(&format!(
        "SELECT id FROM {} WHERE language = ?1 AND text_id = ?2",
        self.names.text_in_lang()
      ))?
      .query_row(params![language, text_id], |r| r.get(0))
      .optional()
  }

  fn insert_text_in_lang(&self, language: &str, text_id: i64) -> rusqlite::Result<i64> {
    self
      .conn
      .prepare_cached(&format!(
        "INSERT INTO {} (language, text_id) VALUES (?1, ?2)",
        self.names.text_in_lang()
      ))?
      .insert(params![language, text_id])
  }

  // ── term_in_lang ──────────────────────────────────────────────────────

  pub fn acquire_term_in_lang_id(
    &self,
    kind: TermKind,
    text_in_lang_id: i64,
  ) -> rusqlite::Result<i64> {
    acquire(
      || self.find_term_in_lang_id(kind, text_in_lang_id),
      || self.insert_term_in_lang(kind, text_in_lang_id),
    )
  }

  fn find_term_in_lang_id(
    &self,
    kind: TermKind,
    text_in_lang_id: i64,
  ) -> rusqlite::Result<Option<i64>> {
    self
      .conn
      .prepare_cached(&format!(
        "SELECT id FROM {} WHERE type_id = ?1 AND text_in_lang_id = ?2",
        self.names.term_in_lang()
      ))?
      .query_row(params![kind.type_id(), text_in_lang_id], |r| r.get(0))
      .optional()
  }

  fn insert_term_in_lang(&self, kind: TermKind, text_in_lang_id: i64) -> rusqlite::Result<i64> {
    self
      .conn
      .prepare_cached(&format!(
        "INSERT INTO {} (type_id, text_in_lang_id) VALUES (?1, ?2)",
        self.names.term_in_lang()
      ))?
      .insert(params![kind.type_id(), text_in_lang_id])
  }
}

/// Find-or-create with conflict recovery; see the module docs.
fn acquire<L, I>(mut lookup: L, mut insert: I) -> rusqlite::Result<i64>
where
  L: FnMut() -> rusqlite::Result<Option<i64>>,
  I: FnMut() -> rusqlite::Result<i64>,
{
  if let Some(id) = lookup()? {
    return Ok(id);
  }

  let mut retried = false;
  loop {
    match insert() {
      Ok(id) => return Ok(id),
      Err(e) if is_unique_violation(&e) => {
        if let Some(id) = lookup()? {
          tracing::debug!(id, "insert lost a race; reusing existing row");
          return Ok(id);
        }
        if retried {
          return Err(e);
        }
        tracing::warn!(error = %e, "unique conflict but no matching row; retrying insert");
        retried = true;
      }
      Err(e) => return Err(e),
    }
  }
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(err, _)
      if err.code == ErrorCode::ConstraintViolation
        && err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}
