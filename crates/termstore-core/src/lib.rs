//! Core types and trait definitions for the term store.
//!
//! This crate is deliberately free of database dependencies. Backends (e.g.
//! `termstore-sqlite`) implement [`store::EntityTermStore`]; hosts depend on
//! the trait and on the value types defined here.

pub mod entity;
pub mod error;
pub mod fingerprint;
pub mod store;
pub mod term;

pub use entity::{EntityId, EntityKind, ItemId, PropertyId};
pub use error::{Error, Result};
pub use fingerprint::Fingerprint;
pub use term::{Term, TermKind};
