//! Local persistence for the breed catalog.

mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::BreedStore;
