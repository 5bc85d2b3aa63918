//! [`SqliteTermStore`] and the per-entity-kind [`SqliteEntityTermStore`].

use std::{marker::PhantomData, path::Path, sync::Arc};

use rusqlite::{TransactionBehavior, params};
use termstore_core::{
  EntityId, Fingerprint, ItemId, PropertyId, Term, TermKind, store::EntityTermStore,
};

use crate::{
  Result,
  assemble::{TermRow, assemble_fingerprint},
  pool::Pools,
  schema::{PRAGMAS, install_sql, uninstall_sql},
  tables::{LinkTable, TableNames},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A term store installation: one connection plus one set of table names.
///
/// Hands out per-entity-kind stores sharing its connection. Cloning is cheap
/// — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteTermStore {
  conn:   tokio_rusqlite::Connection,
  tables: Arc<TableNames>,
}

/// Row counts of every table of an installation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolSizes {
  pub text:           u64,
  pub text_in_lang:   u64,
  pub term_in_lang:   u64,
  pub item_links:     u64,
  pub property_links: u64,
}

impl SqliteTermStore {
  /// Open (or create) the database at `path`. Tables are not created until
  /// [`install`](Self::install) is called.
  pub async fn open(path: impl AsRef<Path>, prefix: &str) -> Result<Self> {
    let tables = TableNames::new(prefix)?;
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self::with_tables(conn, tables);
    store.apply_pragmas().await?;
    Ok(store)
  }

  /// Open an in-memory database — useful for testing.
  pub async fn open_in_memory(prefix: &str) -> Result<Self> {
    let tables = TableNames::new(prefix)?;
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self::with_tables(conn, tables);
    store.apply_pragmas().await?;
    Ok(store)
  }

  /// Use an already-open connection, e.g. to host several prefixed
  /// installations in one database. Connection settings are left alone.
  pub fn from_connection(conn: tokio_rusqlite::Connection, prefix: &str) -> Result<Self> {
    Ok(Self::with_tables(conn, TableNames::new(prefix)?))
  }

  fn with_tables(conn: tokio_rusqlite::Connection, tables: TableNames) -> Self {
    Self { conn, tables: Arc::new(tables) }
  }

  async fn apply_pragmas(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(PRAGMAS)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub fn table_names(&self) -> &TableNames { &self.tables }

  // ── Installation ──────────────────────────────────────────────────────

  /// Create all tables and indexes. Safe to call on an installed store.
  pub async fn install(&self) -> Result<()> {
    let sql = install_sql(&self.tables);
    tracing::info!(tables = ?self.tables.all(), "installing term store");

    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&sql)?;
        Ok(())
      })
      .await?;

    tracing::info!("term store installed");
    Ok(())
  }

  /// Drop all tables. **Removes all data.** A no-op if nothing is installed.
  pub async fn uninstall(&self) -> Result<()> {
    let sql = uninstall_sql(&self.tables);
    tracing::info!(tables = ?self.tables.all(), "uninstalling term store: removing tables");

    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&sql)?;
        Ok(())
      })
      .await?;

    tracing::info!("term store uninstalled");
    Ok(())
  }

  /// Whether every table of this installation exists.
  pub async fn is_installed(&self) -> Result<bool> {
    let tables = Arc::clone(&self.tables);

    let found: usize = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
        let mut found = 0;
        for table in tables.all() {
          if stmt.exists(params![table])? {
            found += 1;
          }
        }
        Ok(found)
      })
      .await?;

    Ok(found == self.tables.all().len())
  }

  /// Row counts per table. Pools only ever grow, so this is how their size
  /// is watched.
  pub async fn pool_sizes(&self) -> Result<PoolSizes> {
    let tables = Arc::clone(&self.tables);

    let sizes = self
      .conn
      .call(move |conn| {
        let count = |table: &str| -> rusqlite::Result<u64> {
          conn.query_row(&format!("SELECT count(*) FROM {table}"), [], |r| r.get(0))
        };
        Ok(PoolSizes {
          text:           count(tables.text())?,
          text_in_lang:   count(tables.text_in_lang())?,
          term_in_lang:   count(tables.term_in_lang())?,
          item_links:     count(tables.item_terms())?,
          property_links: count(tables.property_terms())?,
        })
      })
      .await?;

    Ok(sizes)
  }

  // ── Entity stores ─────────────────────────────────────────────────────

  pub fn entity_term_store<Id: EntityId>(&self) -> SqliteEntityTermStore<Id> {
    SqliteEntityTermStore {
      conn:   self.conn.clone(),
      tables: Arc::clone(&self.tables),
      _id:    PhantomData,
    }
  }

  pub fn item_term_store(&self) -> SqliteItemTermStore { self.entity_term_store() }

  pub fn property_term_store(&self) -> SqlitePropertyTermStore { self.entity_term_store() }
}

// ─── Entity term store ───────────────────────────────────────────────────────

/// Terms of one entity kind, selected by `Id`.
///
/// The kind only decides which link table is used; normalization and
/// reassembly are shared by all kinds.
pub struct SqliteEntityTermStore<Id> {
  conn:   tokio_rusqlite::Connection,
  tables: Arc<TableNames>,
  _id:    PhantomData<fn() -> Id>,
}

pub type SqliteItemTermStore = SqliteEntityTermStore<ItemId>;
pub type SqlitePropertyTermStore = SqliteEntityTermStore<PropertyId>;

impl<Id> Clone for SqliteEntityTermStore<Id> {
  fn clone(&self) -> Self {
    Self {
      conn:   self.conn.clone(),
      tables: Arc::clone(&self.tables),
      _id:    PhantomData,
    }
  }
}

fn delete_links(
  conn: &rusqlite::Connection,
  link: LinkTable<'_>,
  entity_id: u32,
) -> rusqlite::Result<usize> {
  conn
    .prepare_cached(&format!("DELETE FROM {} WHERE {} = ?1", link.table, link.id_column))?
    .execute(params![entity_id])
}

impl<Id: EntityId> EntityTermStore<Id> for SqliteEntityTermStore<Id> {
  type Error = crate::Error;

  async fn store_terms(&self, id: Id, terms: &Fingerprint) -> Result<()> {
    let entity_id = id.numeric_id();
    let terms: Vec<(TermKind, Term)> = terms.terms().collect();
    let tables = Arc::clone(&self.tables);
    tracing::debug!(entity = %id, terms = terms.len(), "storing terms");

    // Full replace: drop every link, then link each term afresh.
    let replaced = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let link = tables.link_table(Id::KIND);
        let replaced = delete_links(&tx, link, entity_id)?;

        {
          let pools = Pools::new(&tx, &tables);
          let mut insert_link = tx.prepare_cached(&format!(
            "INSERT INTO {} ({}, term_in_lang_id) VALUES (?1, ?2)",
            link.table, link.id_column
          ))?;
          for (kind, term) in &terms {
            let term_in_lang_id = pools.acquire_typed_term_id(*kind, term)?;
            insert_link.execute(params![entity_id, term_in_lang_id])?;
          }
        }

        tx.commit()?;
        Ok(replaced)
      })
      .await?;

    tracing::debug!(entity = %id, replaced, "terms stored");
    Ok(())
  }

  async fn delete_terms(&self, id: Id) -> Result<()> {
    let entity_id = id.numeric_id();
    let tables = Arc::clone(&self.tables);

    let deleted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let deleted = delete_links(&tx, tables.link_table(Id::KIND), entity_id)?;
        tx.commit()?;
        Ok(deleted)
      })
      .await?;

    tracing::debug!(entity = %id, deleted, "terms deleted");
    Ok(())
  }

  async fn get_terms(&self, id: Id) -> Result<Fingerprint> {
    let entity_id = id.numeric_id();
    let tables = Arc::clone(&self.tables);

    let rows: Vec<TermRow> = self
      .conn
      .call(move |conn| {
        let link = tables.link_table(Id::KIND);
        let mut stmt = conn.prepare_cached(&format!(
          "SELECT x.text, xl.language, tl.type_id
           FROM {link_table} l
           INNER JOIN {term_in_lang} tl ON tl.id = l.term_in_lang_id
           INNER JOIN {text_in_lang} xl ON xl.id = tl.text_in_lang_id
           INNER JOIN {text}         x  ON x.id  = xl.text_id
           WHERE l.{id_column} = ?1
           ORDER BY l.id",
          link_table = link.table,
          id_column = link.id_column,
          term_in_lang = tables.term_in_lang(),
          text_in_lang = tables.text_in_lang(),
          text = tables.text(),
        ))?;

        let rows = stmt
          .query_map(params![entity_id], |row| {
            Ok(TermRow {
              text:     row.get(0)?,
              language: row.get(1)?,
              type_id:  row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    tracing::debug!(entity = %id, rows = rows.len(), "terms read");
    Ok(assemble_fingerprint(rows))
  }
}
