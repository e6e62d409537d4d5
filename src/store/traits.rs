//! Storage trait for the local breed cache.

use color_eyre::Result;

use crate::breed::Breed;

/// Durable keyed storage for breeds.
///
/// `insert` only buffers; `save` commits everything buffered so far as one
/// atomic write. A breed whose `external_id` is already stored is silently
/// skipped at commit time, so replaying a remote page is harmless.
pub trait BreedStore: Send + Sync {
  /// Exact number of stored breeds.
  fn count(&self) -> Result<usize>;

  /// Breeds sorted ascending by name, optionally limited.
  fn fetch_sorted(&self, limit: Option<usize>) -> Result<Vec<Breed>>;

  /// Favorite breeds, sorted ascending by name.
  fn fetch_favorites(&self) -> Result<Vec<Breed>>;

  /// Buffer a breed for the next `save`. Duplicate ids are a no-op, never
  /// an error.
  fn insert(&self, breed: &Breed) -> Result<()>;

  /// Durably commit all buffered inserts in one transaction.
  fn save(&self) -> Result<()>;

  /// Persist a favorite flag immediately as a single write.
  fn set_favorite(&self, external_id: &str, favorite: bool) -> Result<()>;
}
