//! Resolution engine: find-or-create chains over loosely-specified input
//!
//! Callers hand in natural keys (a location name, a box code, a part
//! number); the engine resolves them to rows, lazily creating boxes where
//! the contract allows, and reports via `Resolved` whether each add hit an
//! existing row or created one.
//!
//! Every operation runs inside a single rusqlite transaction. References
//! are resolved before any write, so a failed resolution never leaves a
//! partial write behind (in particular, a bad part number cannot leave a
//! freshly created box). Dropping the transaction on an early return rolls
//! everything back.
//!
//! Find-or-create is insert-on-conflict followed by a re-select, backed by
//! the schema's unique constraints, so two racing adds for the same natural
//! key converge on one row instead of both passing a read-then-write check.

use rusqlite::Connection;

use super::{repo, BoxRecord, InventoryRecord, Location, Part, Resolved, Store, StorageBox};
use crate::core::error::{EntityKind, InventoryError, Result};

/// Reject blank natural keys before they reach the store
fn require_key(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(InventoryError::Invalid {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Find-or-create a box under the given location
///
/// Box codes are globally unique: a code already claimed by a different
/// location is a conflict, never a second box and never a silent re-home.
fn resolve_box(conn: &Connection, code: &str, location: &Location) -> Result<Resolved<StorageBox>> {
    let created = repo::insert_box(conn, code, location.location_id)?;
    let storage_box = repo::box_by_code(conn, code)?
        .ok_or_else(|| InventoryError::not_found(EntityKind::Box, code))?;

    if storage_box.location_id != location.location_id {
        let holder = repo::location_by_id(conn, storage_box.location_id)?
            .map(|l| l.name)
            .unwrap_or_default();
        return Err(InventoryError::CodeInUse {
            code: code.to_string(),
            location: holder,
        });
    }

    Ok(if created {
        Resolved::Created(storage_box)
    } else {
        Resolved::Existing(storage_box)
    })
}

impl Store {
    /// Register a location, idempotent on its name
    ///
    /// On re-add the stored row is returned verbatim; the submitted
    /// description is discarded.
    pub fn add_location(
        &mut self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Resolved<Location>> {
        require_key("location name", name)?;

        let tx = self.conn.transaction()?;
        let created = repo::insert_location(&tx, name, description)?;
        let location = repo::location_by_name(&tx, name)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Location, name))?;
        tx.commit()?;

        Ok(if created {
            Resolved::Created(location)
        } else {
            Resolved::Existing(location)
        })
    }

    /// Register a part, idempotent on its part number
    pub fn add_part(
        &mut self,
        part_number: &str,
        description: Option<&str>,
    ) -> Result<Resolved<Part>> {
        require_key("part number", part_number)?;

        let tx = self.conn.transaction()?;
        let created = repo::insert_part(&tx, part_number, description)?;
        let part = repo::part_by_number(&tx, part_number)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Part, part_number))?;
        tx.commit()?;

        Ok(if created {
            Resolved::Created(part)
        } else {
            Resolved::Existing(part)
        })
    }

    /// Register a box under an existing location, idempotent on its code
    ///
    /// Locations are never auto-created; an unknown location name fails
    /// `NotFound` with no write.
    pub fn add_box(&mut self, code: &str, location_name: &str) -> Result<Resolved<BoxRecord>> {
        require_key("box code", code)?;

        let tx = self.conn.transaction()?;
        let location = repo::location_by_name(&tx, location_name)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Location, location_name))?;

        let resolved = resolve_box(&tx, code, &location)?;
        let was_created = resolved.was_created();
        let storage_box = resolved.into_record();
        tx.commit()?;

        let record = BoxRecord {
            box_id: storage_box.box_id,
            code: storage_box.code,
            location_name: location.name,
            created_at: storage_box.created_at,
        };
        Ok(if was_created {
            Resolved::Created(record)
        } else {
            Resolved::Existing(record)
        })
    }

    /// Add stock of a part to a box, idempotent on the (box, part) pair
    ///
    /// The part and location must already exist; the box is created on the
    /// fly when its code is unseen. When the pair already has a row it is
    /// returned verbatim - idempotent add, not upsert: the submitted
    /// quantity and description are discarded and nothing accumulates.
    pub fn add_inventory(
        &mut self,
        box_code: &str,
        part_number: &str,
        description: Option<&str>,
        location_name: &str,
        quantity: i64,
    ) -> Result<Resolved<InventoryRecord>> {
        require_key("box code", box_code)?;
        if quantity < 0 {
            return Err(InventoryError::Invalid {
                field: "quantity",
                reason: format!("must not be negative (got {})", quantity),
            });
        }

        let tx = self.conn.transaction()?;

        // Resolve every reference before the first write.
        let part = repo::part_by_number(&tx, part_number)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Part, part_number))?;
        let location = repo::location_by_name(&tx, location_name)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Location, location_name))?;

        let storage_box = resolve_box(&tx, box_code, &location)?.into_record();

        let created = repo::insert_inventory(
            &tx,
            storage_box.box_id,
            part.part_id,
            description,
            quantity,
        )?;
        let item = repo::inventory_by_box_and_part(&tx, storage_box.box_id, part.part_id)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Inventory, part_number))?;
        tx.commit()?;

        let record = InventoryRecord {
            inventory_id: item.item_id,
            box_code: storage_box.code,
            part_number: part.part_number,
            description: item.description,
            location_name: location.name,
            quantity: item.quantity,
            updated_at: item.updated_at,
        };
        Ok(if created {
            Resolved::Created(record)
        } else {
            Resolved::Existing(record)
        })
    }

    /// Replace an inventory item's part, description, and quantity
    ///
    /// Full-field replace, no partial update. The new part number must
    /// resolve to a catalog part, and the timestamp is refreshed.
    pub fn update_inventory(
        &mut self,
        item_id: i64,
        part_number: &str,
        description: Option<&str>,
        quantity: i64,
    ) -> Result<InventoryRecord> {
        require_key("part number", part_number)?;
        if quantity < 0 {
            return Err(InventoryError::Invalid {
                field: "quantity",
                reason: format!("must not be negative (got {})", quantity),
            });
        }

        let tx = self.conn.transaction()?;
        repo::inventory_by_id(&tx, item_id)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Inventory, item_id.to_string()))?;
        let part = repo::part_by_number(&tx, part_number)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Part, part_number))?;

        repo::update_inventory_row(&tx, item_id, part.part_id, description, quantity)?;
        let record = repo::inventory_record_by_id(&tx, item_id)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Inventory, item_id.to_string()))?;
        tx.commit()?;

        Ok(record)
    }

    /// Delete a location; blocked while it still holds boxes
    pub fn delete_location(&mut self, id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        let location = repo::location_by_id(&tx, id)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Location, id.to_string()))?;

        let children = repo::count_boxes_for_location(&tx, id)?;
        if children > 0 {
            return Err(InventoryError::InUse {
                kind: EntityKind::Location,
                key: location.name,
                children,
                child_kind: EntityKind::Box,
            });
        }

        repo::delete_location_row(&tx, id)?;
        tx.commit()?;
        Ok(())
    }

    /// Delete a box and, atomically, every inventory item inside it
    ///
    /// Returns how many items went away with it.
    pub fn delete_box(&mut self, id: i64) -> Result<usize> {
        let tx = self.conn.transaction()?;
        repo::box_by_id(&tx, id)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Box, id.to_string()))?;

        let children = repo::count_inventory_for_box(&tx, id)?;
        repo::delete_box_row(&tx, id)?;
        tx.commit()?;
        Ok(children)
    }

    /// Delete a part; blocked while inventory still references it
    pub fn delete_part(&mut self, id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        let part = repo::part_by_id(&tx, id)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Part, id.to_string()))?;

        let children = repo::count_inventory_for_part(&tx, id)?;
        if children > 0 {
            return Err(InventoryError::InUse {
                kind: EntityKind::Part,
                key: part.part_number,
                children,
                child_kind: EntityKind::Inventory,
            });
        }

        repo::delete_part_row(&tx, id)?;
        tx.commit()?;
        Ok(())
    }

    /// Delete a single inventory item
    pub fn delete_inventory(&mut self, id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        repo::inventory_by_id(&tx, id)?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Inventory, id.to_string()))?;
        repo::delete_inventory_row(&tx, id)?;
        tx.commit()?;
        Ok(())
    }
}
