//! Row and view types for the four inventory entities
//!
//! Row types mirror the tables one to one. The `*Record` views are join
//! projections that echo natural keys (box code, part number, location name)
//! back to callers alongside the surrogate ids.

use chrono::{DateTime, Utc};
use serde::Serialize;

// =========================================================================
// Row Types
// =========================================================================

/// A physical area that holds boxes
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub location_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A container placed at exactly one location
///
/// Named `StorageBox` to stay clear of `std::boxed::Box`.
#[derive(Debug, Clone, Serialize)]
pub struct StorageBox {
    pub box_id: i64,
    pub code: String,
    pub location_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A catalog part
#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub part_id: i64,
    pub part_number: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Stock of one part inside one box
///
/// The `description` is a per-item snapshot, distinct from the part's
/// catalog description.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryItem {
    pub item_id: i64,
    pub box_id: i64,
    pub part_id: i64,
    pub description: Option<String>,
    pub quantity: i64,
    pub updated_at: DateTime<Utc>,
}

// =========================================================================
// View Types
// =========================================================================

/// Box joined with its location name
#[derive(Debug, Clone, Serialize)]
pub struct BoxRecord {
    pub box_id: i64,
    pub code: String,
    pub location_name: String,
    pub created_at: DateTime<Utc>,
}

/// Inventory item joined with box code, part number, and location name
#[derive(Debug, Clone, Serialize)]
pub struct InventoryRecord {
    pub inventory_id: i64,
    pub box_code: String,
    pub part_number: String,
    pub description: Option<String>,
    pub location_name: String,
    pub quantity: i64,
    pub updated_at: DateTime<Utc>,
}

// =========================================================================
// Operation Result Types
// =========================================================================

/// Outcome tag for add-style operations
///
/// Every add is idempotent on its natural key; the tag records which branch
/// the resolution took so callers can assert on implicit creation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", content = "record", rename_all = "lowercase")]
pub enum Resolved<T> {
    /// The natural key already existed; the stored row is returned verbatim
    Existing(T),
    /// A new row was created for the natural key
    Created(T),
}

impl<T> Resolved<T> {
    pub fn record(&self) -> &T {
        match self {
            Resolved::Existing(record) | Resolved::Created(record) => record,
        }
    }

    pub fn into_record(self) -> T {
        match self {
            Resolved::Existing(record) | Resolved::Created(record) => record,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Resolved::Created(_))
    }
}
