//! SQL schema for the term store, generated per [`TableNames`].
//!
//! Every statement is idempotent (`IF NOT EXISTS` / `IF EXISTS`), so install
//! and uninstall can be repeated safely.

use strum::IntoEnumIterator as _;
use termstore_core::EntityKind;

use crate::tables::TableNames;

/// Connection-level settings applied once when a connection is opened.
pub const PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;
";

/// DDL creating all five tables and their indexes.
pub fn install_sql(names: &TableNames) -> String {
  let text = names.text();
  let text_in_lang = names.text_in_lang();
  let term_in_lang = names.term_in_lang();

  let mut sql = format!(
    "
-- Pools are shared by every entity and only ever grow.
CREATE TABLE IF NOT EXISTS {text} (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    text  TEXT NOT NULL,
    UNIQUE (text)
);

CREATE TABLE IF NOT EXISTS {text_in_lang} (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    language TEXT    NOT NULL,
    text_id  INTEGER NOT NULL REFERENCES {text}(id),
    UNIQUE (language, text_id)
);

CREATE TABLE IF NOT EXISTS {term_in_lang} (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    type_id         INTEGER NOT NULL,   -- 1 label | 2 description | 3 alias
    text_in_lang_id INTEGER NOT NULL REFERENCES {text_in_lang}(id),
    UNIQUE (type_id, text_in_lang_id)
);

CREATE INDEX IF NOT EXISTS {text_in_lang_text_idx} ON {text_in_lang}(text_id);
CREATE INDEX IF NOT EXISTS {term_in_lang_text_idx} ON {term_in_lang}(text_in_lang_id);
",
    text_in_lang_text_idx = names.prefixed("wbt_text_in_lang_text_id"),
    term_in_lang_text_idx = names.prefixed("wbt_term_in_lang_text_in_lang_id"),
  );

  for kind in EntityKind::iter() {
    let link = names.link_table(kind);
    sql.push_str(&format!(
      "
-- No uniqueness on (entity, term): the write path replaces links wholesale.
CREATE TABLE IF NOT EXISTS {table} (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    {id_column}     INTEGER NOT NULL,
    term_in_lang_id INTEGER NOT NULL REFERENCES {term_in_lang}(id)
);

CREATE INDEX IF NOT EXISTS {entity_idx} ON {table}({id_column});
CREATE INDEX IF NOT EXISTS {term_idx}   ON {table}(term_in_lang_id);
",
      table = link.table,
      id_column = link.id_column,
      entity_idx = format!("{}_{}", link.table, link.id_column),
      term_idx = format!("{}_term_in_lang_id", link.table),
    ));
  }

  sql
}

/// DDL dropping all five tables, link tables first.
pub fn uninstall_sql(names: &TableNames) -> String {
  names
    .all()
    .iter()
    .map(|table| format!("DROP TABLE IF EXISTS {table};\n"))
    .collect()
}
