//! SQLite implementation of the breed store.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use color_eyre::{eyre::eyre, Result};
use rusqlite::{params, Connection, Row};

use super::traits::BreedStore;
use crate::breed::Breed;

/// Local breed cache backed by SQLite.
///
/// Inserts are buffered in memory and written in one transaction by
/// `save`, so a page of remote breeds lands atomically or not at all.
pub struct SqliteStore {
  conn: Mutex<Connection>,
  pending: Mutex<Vec<Breed>>,
}

impl SqliteStore {
  /// Open the store at the default location under the user data dir.
  pub fn open_default() -> Result<Self> {
    Self::open(&Self::default_path()?)
  }

  /// Open the store at an explicit path.
  pub fn open(path: &Path) -> Result<Self> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| eyre!("Failed to create data directory: {}", e))?;
    }

    let conn = Connection::open(path)
      .map_err(|e| eyre!("Failed to open breed database at {}: {}", path.display(), e))?;

    Self::from_connection(conn)
  }

  /// Open an in-memory store. Used by tests.
  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()
      .map_err(|e| eyre!("Failed to open in-memory database: {}", e))?;

    Self::from_connection(conn)
  }

  fn from_connection(conn: Connection) -> Result<Self> {
    let store = Self {
      conn: Mutex::new(conn),
      pending: Mutex::new(Vec::new()),
    };
    store.run_migrations()?;

    Ok(store)
  }

  /// Get the default database path.
  pub fn default_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .ok_or_else(|| eyre!("Could not determine data directory"))?;

    Ok(data_dir.join("catwalk").join("breeds.db"))
  }

  fn run_migrations(&self) -> Result<()> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    conn
      .execute_batch(BREEDS_SCHEMA)
      .map_err(|e| eyre!("Failed to run breed migrations: {}", e))?;

    Ok(())
  }
}

/// Schema for the breed cache.
const BREEDS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS breeds (
    external_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    origin TEXT,
    temperament TEXT,
    description TEXT,
    image_url TEXT,
    life_span_min INTEGER,
    life_span_max INTEGER,
    is_favorite INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_breeds_name ON breeds(name);
"#;

const BREED_COLUMNS: &str =
  "external_id, name, origin, temperament, description, image_url, life_span_min, life_span_max, is_favorite";

fn breed_from_row(row: &Row<'_>) -> rusqlite::Result<Breed> {
  Ok(Breed {
    external_id: row.get(0)?,
    name: row.get(1)?,
    origin: row.get(2)?,
    temperament: row.get(3)?,
    description: row.get(4)?,
    image_url: row.get(5)?,
    life_span_min: row.get(6)?,
    life_span_max: row.get(7)?,
    is_favorite: row.get(8)?,
  })
}

impl BreedStore for SqliteStore {
  fn count(&self) -> Result<usize> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    let count: usize = conn
      .query_row("SELECT COUNT(*) FROM breeds", [], |row| row.get(0))
      .map_err(|e| eyre!("Failed to count breeds: {}", e))?;

    Ok(count)
  }

  fn fetch_sorted(&self, limit: Option<usize>) -> Result<Vec<Breed>> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    // -1 disables the LIMIT clause in SQLite
    let limit = limit.map(|n| n as i64).unwrap_or(-1);

    let mut stmt = conn
      .prepare(&format!(
        "SELECT {} FROM breeds ORDER BY name LIMIT ?",
        BREED_COLUMNS
      ))
      .map_err(|e| eyre!("Failed to prepare breed query: {}", e))?;

    let breeds: Vec<Breed> = stmt
      .query_map(params![limit], breed_from_row)
      .map_err(|e| eyre!("Failed to query breeds: {}", e))?
      .collect::<rusqlite::Result<_>>()
      .map_err(|e| eyre!("Failed to read breed row: {}", e))?;

    Ok(breeds)
  }

  fn fetch_favorites(&self) -> Result<Vec<Breed>> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    let mut stmt = conn
      .prepare(&format!(
        "SELECT {} FROM breeds WHERE is_favorite = 1 ORDER BY name",
        BREED_COLUMNS
      ))
      .map_err(|e| eyre!("Failed to prepare favorites query: {}", e))?;

    let breeds: Vec<Breed> = stmt
      .query_map([], breed_from_row)
      .map_err(|e| eyre!("Failed to query favorites: {}", e))?
      .collect::<rusqlite::Result<_>>()
      .map_err(|e| eyre!("Failed to read breed row: {}", e))?;

    Ok(breeds)
  }

  fn insert(&self, breed: &Breed) -> Result<()> {
    let mut pending = self
      .pending
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    pending.push(breed.clone());
    Ok(())
  }

  fn save(&self) -> Result<()> {
    let mut pending = self
      .pending
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    if pending.is_empty() {
      return Ok(());
    }

    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    conn
      .execute("BEGIN TRANSACTION", [])
      .map_err(|e| eyre!("Failed to begin transaction: {}", e))?;

    for breed in pending.iter() {
      let result = conn.execute(
        &format!(
          "INSERT OR IGNORE INTO breeds ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
          BREED_COLUMNS
        ),
        params![
          breed.external_id,
          breed.name,
          breed.origin,
          breed.temperament,
          breed.description,
          breed.image_url,
          breed.life_span_min,
          breed.life_span_max,
          breed.is_favorite,
        ],
      );

      if let Err(e) = result {
        let _ = conn.execute("ROLLBACK", []);
        return Err(eyre!("Failed to store breed {}: {}", breed.external_id, e));
      }
    }

    conn
      .execute("COMMIT", [])
      .map_err(|e| eyre!("Failed to commit breeds: {}", e))?;

    pending.clear();
    Ok(())
  }

  fn set_favorite(&self, external_id: &str, favorite: bool) -> Result<()> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    conn
      .execute(
        "UPDATE breeds SET is_favorite = ? WHERE external_id = ?",
        params![favorite, external_id],
      )
      .map_err(|e| eyre!("Failed to update favorite for {}: {}", external_id, e))?;

    Ok(())
  }
}
