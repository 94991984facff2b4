//! Read-side facade: point, natural-key, and relationship lookups
//!
//! Point and natural-key lookups fail `NotFound`; list operations return an
//! insertion-ordered `Vec`, empty when nothing matches.

use super::{repo, BoxRecord, InventoryRecord, Location, Part, Store};
use crate::core::error::{EntityKind, InventoryError, Result};

impl Store {
    pub fn location_by_id(&self, id: i64) -> Result<Location> {
        repo::location_by_id(&self.conn, id)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Location, id.to_string()))
    }

    /// Exact, case-sensitive name match
    pub fn location_by_name(&self, name: &str) -> Result<Location> {
        repo::location_by_name(&self.conn, name)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Location, name))
    }

    pub fn part_by_id(&self, id: i64) -> Result<Part> {
        repo::part_by_id(&self.conn, id)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Part, id.to_string()))
    }

    pub fn part_by_number(&self, part_number: &str) -> Result<Part> {
        repo::part_by_number(&self.conn, part_number)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Part, part_number))
    }

    pub fn box_by_id(&self, id: i64) -> Result<BoxRecord> {
        repo::box_record_by_id(&self.conn, id)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Box, id.to_string()))
    }

    pub fn box_by_code(&self, code: &str) -> Result<BoxRecord> {
        repo::box_record_by_code(&self.conn, code)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Box, code))
    }

    /// Joined view of one inventory item
    pub fn inventory_record(&self, id: i64) -> Result<InventoryRecord> {
        repo::inventory_record_by_id(&self.conn, id)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Inventory, id.to_string()))
    }

    pub fn list_locations(&self) -> Result<Vec<Location>> {
        repo::locations_all(&self.conn)
    }

    pub fn list_parts(&self) -> Result<Vec<Part>> {
        repo::parts_all(&self.conn)
    }

    pub fn list_boxes(&self) -> Result<Vec<BoxRecord>> {
        repo::box_records_all(&self.conn)
    }

    pub fn list_inventory(&self) -> Result<Vec<InventoryRecord>> {
        repo::inventory_records_all(&self.conn)
    }

    /// All boxes placed at a location; the location itself must exist
    pub fn boxes_for_location(&self, location_name: &str) -> Result<Vec<BoxRecord>> {
        let location = self.location_by_name(location_name)?;
        repo::box_records_for_location(&self.conn, location.location_id)
    }

    /// Everything inside one box; the box itself must exist
    pub fn inventory_for_box(&self, box_code: &str) -> Result<Vec<InventoryRecord>> {
        let record = self.box_by_code(box_code)?;
        repo::inventory_records_for_box(&self.conn, record.box_id)
    }

    /// All stock of a part across boxes; the part itself must exist
    pub fn inventory_for_part(&self, part_number: &str) -> Result<Vec<InventoryRecord>> {
        let part = self.part_by_number(part_number)?;
        repo::inventory_records_for_part(&self.conn, part.part_id)
    }
}
