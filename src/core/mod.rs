//! Core module - store, resolution engine, and shared types

pub mod config;
pub mod error;
pub mod store;

pub use config::Config;
pub use error::{EntityKind, InventoryError};
pub use store::{
    BoxRecord, InventoryItem, InventoryRecord, Location, Part, Resolved, StorageBox, Store,
};
