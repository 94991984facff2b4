//! Typed CRUD over the four entity tables
//!
//! Pure persistence: point reads return `Option`, deletes report whether a
//! row went away, and inserts are conflict-ignoring primitives for the
//! resolution engine's find-or-create sequences. No business rules live
//! here; only store-level faults are raised.
//!
//! Functions take a `&Connection` so the engine can run them against an
//! open transaction and the facade against the plain connection.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{BoxRecord, InventoryItem, InventoryRecord, Location, Part, StorageBox};
use crate::core::error::Result;

/// Current time as stored in the database
fn now_text() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp, falling back to a fixed epoch on bad data
fn parse_datetime(s: String) -> DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap())
}

// =========================================================================
// Row Mappers
// =========================================================================

fn location_from_row(row: &Row) -> rusqlite::Result<Location> {
    Ok(Location {
        location_id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: parse_datetime(row.get::<_, String>(3)?),
    })
}

fn storage_box_from_row(row: &Row) -> rusqlite::Result<StorageBox> {
    Ok(StorageBox {
        box_id: row.get(0)?,
        code: row.get(1)?,
        location_id: row.get(2)?,
        created_at: parse_datetime(row.get::<_, String>(3)?),
    })
}

fn part_from_row(row: &Row) -> rusqlite::Result<Part> {
    Ok(Part {
        part_id: row.get(0)?,
        part_number: row.get(1)?,
        description: row.get(2)?,
        created_at: parse_datetime(row.get::<_, String>(3)?),
    })
}

fn inventory_item_from_row(row: &Row) -> rusqlite::Result<InventoryItem> {
    Ok(InventoryItem {
        item_id: row.get(0)?,
        box_id: row.get(1)?,
        part_id: row.get(2)?,
        description: row.get(3)?,
        quantity: row.get(4)?,
        updated_at: parse_datetime(row.get::<_, String>(5)?),
    })
}

fn box_record_from_row(row: &Row) -> rusqlite::Result<BoxRecord> {
    Ok(BoxRecord {
        box_id: row.get(0)?,
        code: row.get(1)?,
        location_name: row.get(2)?,
        created_at: parse_datetime(row.get::<_, String>(3)?),
    })
}

fn inventory_record_from_row(row: &Row) -> rusqlite::Result<InventoryRecord> {
    Ok(InventoryRecord {
        inventory_id: row.get(0)?,
        box_code: row.get(1)?,
        part_number: row.get(2)?,
        description: row.get(3)?,
        location_name: row.get(4)?,
        quantity: row.get(5)?,
        updated_at: parse_datetime(row.get::<_, String>(6)?),
    })
}

const BOX_RECORD_SELECT: &str = r#"
    SELECT b.box_id, b.code, l.name, b.created_at
    FROM boxes b
    JOIN locations l ON b.location_id = l.location_id
"#;

const INVENTORY_RECORD_SELECT: &str = r#"
    SELECT i.item_id, b.code, p.part_number, i.description, l.name,
           i.quantity, i.updated_at
    FROM inventory i
    JOIN boxes b ON i.box_id = b.box_id
    JOIN parts p ON i.part_id = p.part_id
    JOIN locations l ON b.location_id = l.location_id
"#;

// =========================================================================
// Inserts (conflict-ignoring; return whether a row was created)
// =========================================================================

pub(super) fn insert_location(
    conn: &Connection,
    name: &str,
    description: Option<&str>,
) -> Result<bool> {
    let n = conn.execute(
        "INSERT INTO locations (name, description, created_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(name) DO NOTHING",
        params![name, description, now_text()],
    )?;
    Ok(n > 0)
}

pub(super) fn insert_part(
    conn: &Connection,
    part_number: &str,
    description: Option<&str>,
) -> Result<bool> {
    let n = conn.execute(
        "INSERT INTO parts (part_number, description, created_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(part_number) DO NOTHING",
        params![part_number, description, now_text()],
    )?;
    Ok(n > 0)
}

pub(super) fn insert_box(conn: &Connection, code: &str, location_id: i64) -> Result<bool> {
    let n = conn.execute(
        "INSERT INTO boxes (code, location_id, created_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(code) DO NOTHING",
        params![code, location_id, now_text()],
    )?;
    Ok(n > 0)
}

pub(super) fn insert_inventory(
    conn: &Connection,
    box_id: i64,
    part_id: i64,
    description: Option<&str>,
    quantity: i64,
) -> Result<bool> {
    let n = conn.execute(
        "INSERT INTO inventory (box_id, part_id, description, quantity, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(box_id, part_id) DO NOTHING",
        params![box_id, part_id, description, quantity, now_text()],
    )?;
    Ok(n > 0)
}

// =========================================================================
// Point Reads
// =========================================================================

pub(super) fn location_by_id(conn: &Connection, id: i64) -> Result<Option<Location>> {
    conn.query_row(
        "SELECT location_id, name, description, created_at FROM locations
         WHERE location_id = ?1",
        params![id],
        location_from_row,
    )
    .optional()
    .map_err(Into::into)
}

pub(super) fn location_by_name(conn: &Connection, name: &str) -> Result<Option<Location>> {
    conn.query_row(
        "SELECT location_id, name, description, created_at FROM locations
         WHERE name = ?1",
        params![name],
        location_from_row,
    )
    .optional()
    .map_err(Into::into)
}

pub(super) fn part_by_id(conn: &Connection, id: i64) -> Result<Option<Part>> {
    conn.query_row(
        "SELECT part_id, part_number, description, created_at FROM parts
         WHERE part_id = ?1",
        params![id],
        part_from_row,
    )
    .optional()
    .map_err(Into::into)
}

pub(super) fn part_by_number(conn: &Connection, part_number: &str) -> Result<Option<Part>> {
    conn.query_row(
        "SELECT part_id, part_number, description, created_at FROM parts
         WHERE part_number = ?1",
        params![part_number],
        part_from_row,
    )
    .optional()
    .map_err(Into::into)
}

pub(super) fn box_by_id(conn: &Connection, id: i64) -> Result<Option<StorageBox>> {
    conn.query_row(
        "SELECT box_id, code, location_id, created_at FROM boxes WHERE box_id = ?1",
        params![id],
        storage_box_from_row,
    )
    .optional()
    .map_err(Into::into)
}

pub(super) fn box_by_code(conn: &Connection, code: &str) -> Result<Option<StorageBox>> {
    conn.query_row(
        "SELECT box_id, code, location_id, created_at FROM boxes WHERE code = ?1",
        params![code],
        storage_box_from_row,
    )
    .optional()
    .map_err(Into::into)
}

pub(super) fn inventory_by_id(conn: &Connection, id: i64) -> Result<Option<InventoryItem>> {
    conn.query_row(
        "SELECT item_id, box_id, part_id, description, quantity, updated_at
         FROM inventory WHERE item_id = ?1",
        params![id],
        inventory_item_from_row,
    )
    .optional()
    .map_err(Into::into)
}

pub(super) fn inventory_by_box_and_part(
    conn: &Connection,
    box_id: i64,
    part_id: i64,
) -> Result<Option<InventoryItem>> {
    conn.query_row(
        "SELECT item_id, box_id, part_id, description, quantity, updated_at
         FROM inventory WHERE box_id = ?1 AND part_id = ?2",
        params![box_id, part_id],
        inventory_item_from_row,
    )
    .optional()
    .map_err(Into::into)
}

// =========================================================================
// Joined Views
// =========================================================================

pub(super) fn box_record_by_id(conn: &Connection, id: i64) -> Result<Option<BoxRecord>> {
    conn.query_row(
        &format!("{} WHERE b.box_id = ?1", BOX_RECORD_SELECT),
        params![id],
        box_record_from_row,
    )
    .optional()
    .map_err(Into::into)
}

pub(super) fn box_record_by_code(conn: &Connection, code: &str) -> Result<Option<BoxRecord>> {
    conn.query_row(
        &format!("{} WHERE b.code = ?1", BOX_RECORD_SELECT),
        params![code],
        box_record_from_row,
    )
    .optional()
    .map_err(Into::into)
}

pub(super) fn box_records_all(conn: &Connection) -> Result<Vec<BoxRecord>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY b.box_id", BOX_RECORD_SELECT))?;
    let rows = stmt.query_map([], box_record_from_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

pub(super) fn box_records_for_location(
    conn: &Connection,
    location_id: i64,
) -> Result<Vec<BoxRecord>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE b.location_id = ?1 ORDER BY b.box_id",
        BOX_RECORD_SELECT
    ))?;
    let rows = stmt.query_map(params![location_id], box_record_from_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

pub(super) fn inventory_record_by_id(
    conn: &Connection,
    id: i64,
) -> Result<Option<InventoryRecord>> {
    conn.query_row(
        &format!("{} WHERE i.item_id = ?1", INVENTORY_RECORD_SELECT),
        params![id],
        inventory_record_from_row,
    )
    .optional()
    .map_err(Into::into)
}

pub(super) fn inventory_records_all(conn: &Connection) -> Result<Vec<InventoryRecord>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY i.item_id", INVENTORY_RECORD_SELECT))?;
    let rows = stmt.query_map([], inventory_record_from_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

pub(super) fn inventory_records_for_box(
    conn: &Connection,
    box_id: i64,
) -> Result<Vec<InventoryRecord>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE i.box_id = ?1 ORDER BY i.item_id",
        INVENTORY_RECORD_SELECT
    ))?;
    let rows = stmt.query_map(params![box_id], inventory_record_from_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

pub(super) fn inventory_records_for_part(
    conn: &Connection,
    part_id: i64,
) -> Result<Vec<InventoryRecord>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE i.part_id = ?1 ORDER BY i.item_id",
        INVENTORY_RECORD_SELECT
    ))?;
    let rows = stmt.query_map(params![part_id], inventory_record_from_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

// =========================================================================
// List-Alls
// =========================================================================

pub(super) fn locations_all(conn: &Connection) -> Result<Vec<Location>> {
    let mut stmt = conn.prepare(
        "SELECT location_id, name, description, created_at FROM locations
         ORDER BY location_id",
    )?;
    let rows = stmt.query_map([], location_from_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

pub(super) fn parts_all(conn: &Connection) -> Result<Vec<Part>> {
    let mut stmt = conn.prepare(
        "SELECT part_id, part_number, description, created_at FROM parts
         ORDER BY part_id",
    )?;
    let rows = stmt.query_map([], part_from_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

// =========================================================================
// Updates and Deletes
// =========================================================================

pub(super) fn update_inventory_row(
    conn: &Connection,
    item_id: i64,
    part_id: i64,
    description: Option<&str>,
    quantity: i64,
) -> Result<bool> {
    let n = conn.execute(
        "UPDATE inventory
         SET part_id = ?2, description = ?3, quantity = ?4, updated_at = ?5
         WHERE item_id = ?1",
        params![item_id, part_id, description, quantity, now_text()],
    )?;
    Ok(n > 0)
}

pub(super) fn delete_location_row(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM locations WHERE location_id = ?1", params![id])?;
    Ok(n > 0)
}

pub(super) fn delete_box_row(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM boxes WHERE box_id = ?1", params![id])?;
    Ok(n > 0)
}

pub(super) fn delete_part_row(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM parts WHERE part_id = ?1", params![id])?;
    Ok(n > 0)
}

pub(super) fn delete_inventory_row(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM inventory WHERE item_id = ?1", params![id])?;
    Ok(n > 0)
}

// =========================================================================
// Child Counts (for blocked deletes and cascade reporting)
// =========================================================================

pub(super) fn count_boxes_for_location(conn: &Connection, location_id: i64) -> Result<usize> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM boxes WHERE location_id = ?1",
        params![location_id],
        |row| row.get(0),
    )?;
    Ok(n as usize)
}

pub(super) fn count_inventory_for_box(conn: &Connection, box_id: i64) -> Result<usize> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM inventory WHERE box_id = ?1",
        params![box_id],
        |row| row.get(0),
    )?;
    Ok(n as usize)
}

pub(super) fn count_inventory_for_part(conn: &Connection, part_id: i64) -> Result<usize> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM inventory WHERE part_id = ?1",
        params![part_id],
        |row| row.get(0),
    )?;
    Ok(n as usize)
}
