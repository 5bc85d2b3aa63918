//! Entity identity as far as the term store cares: a kind and a numeric id.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::{Error, Result};

/// The kinds of entity that carry terms. Each kind has its own link table.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
  Item,
  Property,
}

impl EntityKind {
  /// Serialization prefix of ids of this kind (`Q42`, `P31`).
  pub fn id_prefix(self) -> char {
    match self {
      EntityKind::Item => 'Q',
      EntityKind::Property => 'P',
    }
  }
}

/// An identifier whose terms can be stored.
pub trait EntityId: Copy + Send + Sync + fmt::Display + 'static {
  const KIND: EntityKind;

  fn numeric_id(&self) -> u32;
}

fn parse_numeric(kind: EntityKind, s: &str) -> Result<u32> {
  let mut chars = s.chars();
  match chars.next() {
    Some(c) if c.eq_ignore_ascii_case(&kind.id_prefix()) => {}
    Some(_) => {
      return Err(Error::WrongEntityKind {
        expected: match kind {
          EntityKind::Item => "an item id",
          EntityKind::Property => "a property id",
        },
        got: s.to_owned(),
      });
    }
    None => return Err(Error::MalformedEntityId(s.to_owned())),
  }

  let digits = chars.as_str();
  if digits.starts_with('0') || digits.starts_with('+') {
    return Err(Error::MalformedEntityId(s.to_owned()));
  }
  match digits.parse::<u32>() {
    Ok(n) if n > 0 => Ok(n),
    _ => Err(Error::MalformedEntityId(s.to_owned())),
  }
}

macro_rules! entity_id {
  ($(#[$meta:meta])* $name:ident, $kind:expr) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct $name(u32);

    impl $name {
      pub fn new(numeric_id: u32) -> Self { Self(numeric_id) }
    }

    impl EntityId for $name {
      const KIND: EntityKind = $kind;

      fn numeric_id(&self) -> u32 { self.0 }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::KIND.id_prefix(), self.0)
      }
    }

    impl FromStr for $name {
      type Err = Error;

      fn from_str(s: &str) -> Result<Self> {
        parse_numeric(Self::KIND, s).map(Self)
      }
    }
  };
}

entity_id!(
  /// Identifier of an item, serialized as `Q<n>`.
  ItemId,
  EntityKind::Item
);

entity_id!(
  /// Identifier of a property, serialized as `P<n>`.
  PropertyId,
  EntityKind::Property
);
