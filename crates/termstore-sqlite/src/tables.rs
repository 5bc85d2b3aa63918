//! Table names, optionally prefixed so several stores can share a database.

use termstore_core::EntityKind;

use crate::{Error, Result};

const TEXT: &str = "wbt_text";
const TEXT_IN_LANG: &str = "wbt_text_in_lang";
const TERM_IN_LANG: &str = "wbt_term_in_lang";
const ITEM_TERMS: &str = "wbt_item_terms";
const PROPERTY_TERMS: &str = "wbt_property_terms";

/// The names of every table belonging to one store installation.
///
/// Built once from a prefix and passed to whoever needs it; names are
/// interpolated into SQL, hence the restricted prefix alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
  prefix:         String,
  text:           String,
  text_in_lang:   String,
  term_in_lang:   String,
  item_terms:     String,
  property_terms: String,
}

/// The link table of one entity kind and the column holding the entity id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkTable<'a> {
  pub table:     &'a str,
  pub id_column: &'static str,
}

impl TableNames {
  /// Build the table names for `prefix` (may be empty).
  pub fn new(prefix: impl Into<String>) -> Result<Self> {
    let prefix = prefix.into();
    if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
      return Err(Error::InvalidPrefix(prefix));
    }
    Ok(Self::with_valid_prefix(prefix))
  }

  fn with_valid_prefix(prefix: String) -> Self {
    Self {
      text:           format!("{prefix}{TEXT}"),
      text_in_lang:   format!("{prefix}{TEXT_IN_LANG}"),
      term_in_lang:   format!("{prefix}{TERM_IN_LANG}"),
      item_terms:     format!("{prefix}{ITEM_TERMS}"),
      property_terms: format!("{prefix}{PROPERTY_TERMS}"),
      prefix,
    }
  }

  pub fn text(&self) -> &str { &self.text }

  pub fn text_in_lang(&self) -> &str { &self.text_in_lang }

  pub fn term_in_lang(&self) -> &str { &self.term_in_lang }

  pub fn item_terms(&self) -> &str { &self.item_terms }

  pub fn property_terms(&self) -> &str { &self.property_terms }

  pub fn link_table(&self, kind: EntityKind) -> LinkTable<'_> {
    match kind {
      EntityKind::Item => LinkTable { table: &self.item_terms, id_column: "item_id" },
      EntityKind::Property => {
        LinkTable { table: &self.property_terms, id_column: "property_id" }
      }
    }
  }

  /// Prefix an auxiliary name (index names).
  pub fn prefixed(&self, name: &str) -> String { format!("{}{name}", self.prefix) }

  /// All tables, link tables first so dropping in this order never leaves a
  /// dangling reference.
  pub fn all(&self) -> [&str; 5] {
    [
      &self.item_terms,
      &self.property_terms,
      &self.term_in_lang,
      &self.text_in_lang,
      &self.text,
    ]
  }
}

impl Default for TableNames {
  fn default() -> Self {
    Self::with_valid_prefix(String::new())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn no_prefix() {
    assert_eq!(TableNames::new("").unwrap().text(), "wbt_text");
  }

  #[test]
  fn every_table_gets_prefixed() {
    let names = TableNames::new("prefix_").unwrap();
    assert_eq!(names.text(), "prefix_wbt_text");
    assert_eq!(names.text_in_lang(), "prefix_wbt_text_in_lang");
    assert_eq!(names.term_in_lang(), "prefix_wbt_term_in_lang");
    assert_eq!(names.item_terms(), "prefix_wbt_item_terms");
    assert_eq!(names.property_terms(), "prefix_wbt_property_terms");
    assert_eq!(names.prefixed("idx"), "prefix_idx");
  }

  #[test]
  fn link_tables_per_kind() {
    let names = TableNames::new("x_").unwrap();
    assert_eq!(names.link_table(EntityKind::Item), LinkTable {
      table:     "x_wbt_item_terms",
      id_column: "item_id",
    });
    assert_eq!(names.link_table(EntityKind::Property), LinkTable {
      table:     "x_wbt_property_terms",
      id_column: "property_id",
    });
  }

  #[test]
  fn only_alphanumeric_prefixes_are_allowed() {
    for bad in ["-", " ", "abc!", "abc!abc", "%&$", "\"", "'", "\\", "a;b", "ü"] {
      assert!(
        matches!(TableNames::new(bad), Err(Error::InvalidPrefix(_))),
        "{bad:?} should be rejected"
      );
    }
  }
}
