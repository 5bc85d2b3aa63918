//! Command implementations, generic over the entity kind being addressed.

use std::{
  io::{self, Read as _, Write as _},
  path::PathBuf,
};

use anyhow::Context as _;
use termstore_core::{EntityId, Fingerprint, ItemId, PropertyId, store::EntityTermStore};
use termstore_sqlite::SqliteTermStore;

/// An entity id of either kind, as typed on the command line.
#[derive(Debug, Clone, Copy)]
pub enum EntityRef {
  Item(ItemId),
  Property(PropertyId),
}

pub fn parse_entity(s: &str) -> Result<EntityRef, termstore_core::Error> {
  match s.chars().next() {
    Some('P' | 'p') => s.parse().map(EntityRef::Property),
    _ => s.parse().map(EntityRef::Item),
  }
}

pub async fn stats(store: &SqliteTermStore) -> anyhow::Result<()> {
  let sizes = store.pool_sizes().await.context("failed to count rows")?;
  let names = store.table_names();

  let mut out = io::stdout().lock();
  for (table, rows) in [
    (names.text(), sizes.text),
    (names.text_in_lang(), sizes.text_in_lang),
    (names.term_in_lang(), sizes.term_in_lang),
    (names.item_terms(), sizes.item_links),
    (names.property_terms(), sizes.property_links),
  ] {
    writeln!(out, "{table:<32} {rows:>10}")?;
  }
  Ok(())
}

pub async fn store(
  store: &SqliteTermStore,
  entity: EntityRef,
  file: Option<PathBuf>,
) -> anyhow::Result<()> {
  let raw = match &file {
    Some(path) => std::fs::read_to_string(path)
      .with_context(|| format!("reading fingerprint from {}", path.display()))?,
    None => {
      let mut buf = String::new();
      io::stdin().read_to_string(&mut buf).context("reading fingerprint from stdin")?;
      buf
    }
  };
  let fingerprint: Fingerprint = serde_json::from_str(&raw).context("parsing fingerprint")?;

  match entity {
    EntityRef::Item(id) => store_one(&store.item_term_store(), id, &fingerprint).await,
    EntityRef::Property(id) => store_one(&store.property_term_store(), id, &fingerprint).await,
  }
}

async fn store_one<Id, S>(terms: &S, id: Id, fingerprint: &Fingerprint) -> anyhow::Result<()>
where
  Id: EntityId,
  S: EntityTermStore<Id>,
{
  terms
    .store_terms(id, fingerprint)
    .await
    .with_context(|| format!("failed to store terms of {id}"))?;
  tracing::info!(entity = %id, terms = fingerprint.len(), "stored");
  Ok(())
}

pub async fn get(store: &SqliteTermStore, entity: EntityRef) -> anyhow::Result<()> {
  let fingerprint = match entity {
    EntityRef::Item(id) => get_one(&store.item_term_store(), id).await?,
    EntityRef::Property(id) => get_one(&store.property_term_store(), id).await?,
  };

  let mut out = io::stdout().lock();
  serde_json::to_writer_pretty(&mut out, &fingerprint)?;
  writeln!(out)?;
  Ok(())
}

async fn get_one<Id, S>(terms: &S, id: Id) -> anyhow::Result<Fingerprint>
where
  Id: EntityId,
  S: EntityTermStore<Id>,
{
  terms
    .get_terms(id)
    .await
    .with_context(|| format!("failed to read terms of {id}"))
}

pub async fn delete(store: &SqliteTermStore, entity: EntityRef) -> anyhow::Result<()> {
  match entity {
    EntityRef::Item(id) => delete_one(&store.item_term_store(), id).await,
    EntityRef::Property(id) => delete_one(&store.property_term_store(), id).await,
  }
}

async fn delete_one<Id, S>(terms: &S, id: Id) -> anyhow::Result<()>
where
  Id: EntityId,
  S: EntityTermStore<Id>,
{
  terms
    .delete_terms(id)
    .await
    .with_context(|| format!("failed to delete terms of {id}"))?;
  tracing::info!(entity = %id, "deleted");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_both_kinds() {
    assert!(matches!(parse_entity("Q42"), Ok(EntityRef::Item(id)) if id == ItemId::new(42)));
    assert!(matches!(
      parse_entity("p31"),
      Ok(EntityRef::Property(id)) if id == PropertyId::new(31)
    ));
    assert!(parse_entity("X1").is_err());
    assert!(parse_entity("").is_err());
  }
}
