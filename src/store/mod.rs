//! Persistence of per-polygon validity flags, plus the parcel table

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Parcel has no exterior ring")]
    ParcelWithoutExterior,
}

/// Validity flags keyed by polygon id
pub trait ValidityStore {
    /// Insert or overwrite the flag for `polygon_id`. Repeating the same
    /// call leaves the store unchanged.
    fn upsert(&mut self, polygon_id: i64, is_invalid: bool) -> Result<(), StoreError>;

    /// `None` when nothing was recorded for `polygon_id`
    fn lookup(&self, polygon_id: i64) -> Result<Option<bool>, StoreError>;

    /// Unrecorded polygons count as not invalid
    fn is_invalid_or_default(&self, polygon_id: i64) -> Result<bool, StoreError> {
        Ok(self.lookup(polygon_id)?.unwrap_or(false))
    }
}
