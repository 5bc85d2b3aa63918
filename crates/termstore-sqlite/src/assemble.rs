//! Regrouping of flat join rows into a [`Fingerprint`].

use termstore_core::{Fingerprint, TermKind};

/// One row of the four-way join, as read from SQLite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermRow {
  pub text:     String,
  pub language: String,
  pub type_id:  i64,
}

/// Build a fingerprint from `rows`.
///
/// Labels and descriptions keep the last text seen per language. Aliases
/// accumulate in row order. Rows with an unknown `type_id` are skipped.
pub fn assemble_fingerprint(rows: impl IntoIterator<Item = TermRow>) -> Fingerprint {
  let mut fingerprint = Fingerprint::new();

  for row in rows {
    match TermKind::from_type_id(row.type_id) {
      Some(TermKind::Label) => fingerprint.set_label(row.language, row.text),
      Some(TermKind::Description) => fingerprint.set_description(row.language, row.text),
      Some(TermKind::Alias) => {
        fingerprint.add_alias(row.language, row.text);
      }
      None => {
        tracing::warn!(
          type_id = row.type_id,
          language = %row.language,
          "skipping term with unknown type id"
        );
      }
    }
  }

  fingerprint
}
