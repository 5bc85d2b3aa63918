//! Terms — a single piece of text in one language, tagged with its role.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The role a term plays on its entity.
///
/// The discriminants are persisted as `type_id` and must never change.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
  Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TermKind {
  Label       = 1,
  Description = 2,
  Alias       = 3,
}

impl TermKind {
  /// The numeric id stored in the `type_id` column.
  pub fn type_id(self) -> i64 { self as i64 }

  pub fn from_type_id(id: i64) -> Option<Self> {
    match id {
      1 => Some(Self::Label),
      2 => Some(Self::Description),
      3 => Some(Self::Alias),
      _ => None,
    }
  }
}

/// A text in a given language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
  pub language: String,
  pub text:     String,
}

impl Term {
  pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
    Self { language: language.into(), text: text.into() }
  }
}
