//! The `EntityTermStore` trait.
//!
//! Implemented by storage backends (e.g. `termstore-sqlite`). One store
//! instance serves one entity kind, selected by the `Id` type parameter.

use std::future::Future;

use crate::{entity::EntityId, fingerprint::Fingerprint};

/// Read/write/delete access to the terms of one entity kind.
///
/// Absence is never an error: an entity without stored terms has an empty
/// [`Fingerprint`]. Errors are reserved for infrastructure failures.
pub trait EntityTermStore<Id: EntityId>: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Replace all terms of `id` with the contents of `terms`.
  ///
  /// This is a full replace, not a merge: terms of `id` absent from `terms`
  /// are gone afterwards. Passing an empty fingerprint is equivalent to
  /// [`delete_terms`](Self::delete_terms).
  fn store_terms(
    &self,
    id: Id,
    terms: &Fingerprint,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send;

  /// Remove all terms of `id`. A no-op for entities without terms.
  fn delete_terms(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send;

  /// Reassemble the fingerprint of `id`; empty if nothing is stored.
  fn get_terms(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<Fingerprint, Self::Error>> + Send;
}
