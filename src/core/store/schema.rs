//! Database schema initialization

use rusqlite::params;

use super::{Store, SCHEMA_VERSION};
use crate::core::error::Result;

impl Store {
    /// Initialize the database schema
    pub(super) fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            -- Schema version tracking
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            -- Physical areas that hold boxes
            CREATE TABLE IF NOT EXISTS locations (
                location_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                description TEXT,
                created_at TEXT NOT NULL
            );

            -- Containers, each placed at exactly one location.
            -- Codes are globally unique; locations with boxes cannot be
            -- deleted.
            CREATE TABLE IF NOT EXISTS boxes (
                box_id INTEGER PRIMARY KEY,
                code TEXT NOT NULL UNIQUE,
                location_id INTEGER NOT NULL
                    REFERENCES locations(location_id) ON DELETE RESTRICT,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_boxes_location ON boxes(location_id);

            -- Part catalog
            CREATE TABLE IF NOT EXISTS parts (
                part_id INTEGER PRIMARY KEY,
                part_number TEXT NOT NULL UNIQUE,
                description TEXT,
                created_at TEXT NOT NULL
            );

            -- Stock of one part inside one box. Items follow their box on
            -- delete; parts still referenced by items cannot be deleted.
            -- UNIQUE(box_id, part_id) makes find-or-create race-safe.
            CREATE TABLE IF NOT EXISTS inventory (
                item_id INTEGER PRIMARY KEY,
                box_id INTEGER NOT NULL
                    REFERENCES boxes(box_id) ON DELETE CASCADE,
                part_id INTEGER NOT NULL
                    REFERENCES parts(part_id) ON DELETE RESTRICT,
                description TEXT,
                quantity INTEGER NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (box_id, part_id)
            );
            CREATE INDEX IF NOT EXISTS idx_inventory_part ON inventory(part_id);
            "#,
        )?;

        // Set schema version
        self.conn.execute(
            "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;

        Ok(())
    }
}
