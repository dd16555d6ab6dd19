//! SQLite-backed store
//!
//! The connection is owned by [`SqliteStore`]: tables are created when it
//! is opened and the connection closes when the store is dropped or
//! explicitly closed.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use super::{StoreError, ValidityStore};
use crate::geometry::Polygon;
use crate::ingest::{parse_coordinate_array, ring_to_coordinate_array};
use crate::parcel::LandParcel;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS invalid_wildfire (
        polygon_id INTEGER PRIMARY KEY,
        is_invalid INTEGER NOT NULL CHECK (is_invalid IN (0, 1))
    );
    CREATE TABLE IF NOT EXISTS parcels_data (
        id INTEGER PRIMARY KEY,
        owner TEXT,
        polygon TEXT NOT NULL
    );
";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        tracing::info!(path = %path.display(), "opened validity store");
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Close now and surface any error, instead of on drop
    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, e)| StoreError::from(e))?;
        tracing::debug!("closed validity store");
        Ok(())
    }

    /// Stores the parcel's exterior ring as a coordinate array. Returns the
    /// assigned id.
    pub fn insert_parcel(&self, owner: &str, polygon: &Polygon) -> Result<i64, StoreError> {
        let exterior = polygon.exterior().ok_or(StoreError::ParcelWithoutExterior)?;
        self.conn.execute(
            "INSERT INTO parcels_data (owner, polygon) VALUES (?1, ?2)",
            params![owner, ring_to_coordinate_array(exterior)],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Deletes every parcel, returning how many were removed
    pub fn clear_parcels(&self) -> Result<usize, StoreError> {
        Ok(self.conn.execute("DELETE FROM parcels_data", [])?)
    }

    /// All parcels ordered by id. Rows whose polygon column does not parse
    /// are skipped.
    pub fn land_parcels(&self) -> Result<Vec<LandParcel>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, owner, polygon FROM parcels_data ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut parcels = Vec::new();
        for row in rows {
            let (id, owner, polygon_text) = row?;
            match parse_coordinate_array(&polygon_text) {
                Ok(ring) => parcels.push(LandParcel {
                    id,
                    owner: owner.unwrap_or_default(),
                    polygon: Polygon::new(ring, vec![]),
                }),
                Err(e) => tracing::warn!(id, error = %e, "skipping parcel with unreadable polygon"),
            }
        }
        tracing::info!(count = parcels.len(), "retrieved land parcels");
        Ok(parcels)
    }
}

impl ValidityStore for SqliteStore {
    fn upsert(&mut self, polygon_id: i64, is_invalid: bool) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO invalid_wildfire (polygon_id, is_invalid) VALUES (?1, ?2)
             ON CONFLICT (polygon_id) DO UPDATE SET is_invalid = excluded.is_invalid",
            params![polygon_id, is_invalid as i64],
        )?;
        Ok(())
    }

    fn lookup(&self, polygon_id: i64) -> Result<Option<bool>, StoreError> {
        let value: Option<i64> = self
            .conn
            .query_row(
                "SELECT is_invalid FROM invalid_wildfire WHERE polygon_id = ?1",
                params![polygon_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.map(|v| v == 1))
    }
}
