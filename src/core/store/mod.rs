//! SQLite-backed inventory store
//!
//! This module provides the persistent store and everything layered on it:
//! - `schema`: table definitions and version tracking
//! - `repo`: typed CRUD over the four entity tables, no business rules
//! - `query`: the read-side facade (point, natural-key, and relationship
//!   lookups)
//! - `resolve`: the resolution engine (find-or-create chains, idempotent
//!   adds, cascade/restrict deletes)
//!
//! The database file is the system of record. It is opened with foreign key
//! enforcement and WAL journaling; a file written by an incompatible schema
//! version is refused rather than silently migrated or rebuilt.

mod query;
mod repo;
mod resolve;
mod schema;
mod types;

// Re-export all types
pub use types::*;

use std::fs;
use std::path::Path;

use rusqlite::Connection;

use crate::core::error::{InventoryError, Result};

/// Current schema version - opening a file with a different version fails
const SCHEMA_VERSION: i32 = 1;

/// The inventory store backed by a single SQLite file
#[derive(Debug)]
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create the database at the given path
    ///
    /// A missing file (or a present but empty one) is initialized with the
    /// current schema.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| InventoryError::Io(e.to_string()))?;
            }
        }

        let conn = Connection::open(path)?;
        // Foreign keys are off by default in SQLite; WAL keeps readers
        // unblocked while a write commits.
        conn.execute_batch("PRAGMA foreign_keys=ON; PRAGMA journal_mode=WAL;")?;

        let store = Self { conn };
        match store.schema_version() {
            0 => store.init_schema()?,
            v if v == SCHEMA_VERSION => {}
            v => {
                return Err(InventoryError::SchemaVersion {
                    found: v,
                    expected: SCHEMA_VERSION,
                })
            }
        }

        Ok(store)
    }

    /// Open an in-memory store, used by tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Schema version recorded in the file, 0 when uninitialized
    fn schema_version(&self) -> i32 {
        self.conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_database_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("inventory.db");

        let store = Store::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.schema_version(), SCHEMA_VERSION);
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested/dir/inventory.db");

        Store::open(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_reopen_preserves_data() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("inventory.db");

        {
            let mut store = Store::open(&path).unwrap();
            store.add_location("204.1", Some("shelf")).unwrap();
        }

        let store = Store::open(&path).unwrap();
        let location = store.location_by_name("204.1").unwrap();
        assert_eq!(location.description.as_deref(), Some("shelf"));
    }

    #[test]
    fn test_foreign_keys_are_enforced() {
        let store = Store::open_in_memory().unwrap();
        let enabled: i64 = store
            .conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_open_refuses_unknown_schema_version() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("inventory.db");

        {
            let store = Store::open(&path).unwrap();
            store
                .conn
                .execute("UPDATE schema_version SET version = 99", [])
                .unwrap();
        }

        let err = Store::open(&path).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::SchemaVersion {
                found: 99,
                expected: SCHEMA_VERSION
            }
        ));
    }
}
