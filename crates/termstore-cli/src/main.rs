//! `termstore` — manage a SQLite term store from the shell.
//!
//! # Usage
//!
//! ```text
//! termstore install
//! termstore store Q42 fingerprint.json
//! echo '{"labels":{"en":"Hello"}}' | termstore store P31
//! termstore get Q42
//! termstore delete Q42
//! termstore stats
//! ```
//!
//! Settings come from an optional TOML file (`--config`, default
//! `termstore.toml`) overlaid with `TERMSTORE_*` environment variables.

mod commands;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use termstore_sqlite::SqliteTermStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::commands::EntityRef;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "termstore", author, version, about = "Normalized multilingual term store")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "termstore.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Create the store's tables (no-op if already installed).
  Install,
  /// Drop the store's tables. Removes all data.
  Uninstall,
  /// Print row counts of every table.
  Stats,
  /// Replace the terms of an entity with a JSON fingerprint.
  Store {
    /// Entity id, e.g. `Q42` or `P31`.
    #[arg(value_parser = commands::parse_entity)]
    entity: EntityRef,
    /// JSON file to read; stdin when omitted.
    file:   Option<PathBuf>,
  },
  /// Print the terms of an entity as JSON.
  Get {
    #[arg(value_parser = commands::parse_entity)]
    entity: EntityRef,
  },
  /// Remove all terms of an entity.
  Delete {
    #[arg(value_parser = commands::parse_entity)]
    entity: EntityRef,
  },
}

// ─── Settings ─────────────────────────────────────────────────────────────────

/// Shape of the configuration file / environment.
#[derive(Debug, Clone, Deserialize)]
struct Settings {
  #[serde(default = "default_database_path")]
  database_path: PathBuf,
  #[serde(default)]
  table_prefix:  String,
}

fn default_database_path() -> PathBuf { PathBuf::from("termstore.sqlite3") }

fn load_settings(path: PathBuf) -> anyhow::Result<Settings> {
  config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("TERMSTORE"))
    .build()
    .context("failed to read config file")?
    .try_deserialize()
    .context("failed to deserialise Settings")
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr; stdout carries command output.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = load_settings(cli.config)?;

  let store = SqliteTermStore::open(&settings.database_path, &settings.table_prefix)
    .await
    .with_context(|| format!("failed to open store at {:?}", settings.database_path))?;

  match cli.command {
    Command::Install => store.install().await.context("install failed")?,
    Command::Uninstall => store.uninstall().await.context("uninstall failed")?,
    Command::Stats => commands::stats(&store).await?,
    Command::Store { entity, file } => commands::store(&store, entity, file).await?,
    Command::Get { entity } => commands::get(&store, entity).await?,
    Command::Delete { entity } => commands::delete(&store, entity).await?,
  }

  Ok(())
}
