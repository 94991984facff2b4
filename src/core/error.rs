//! Error taxonomy for the inventory core
//!
//! Resolution failures carry the offending natural key so callers can show
//! the user exactly what failed to resolve. "Already exists" is never an
//! error here - the resolution engine folds it into `Resolved::Existing`.

use thiserror::Error;

/// The four entity kinds, used to qualify error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Location,
    Box,
    Part,
    Inventory,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Location => "location",
            EntityKind::Box => "box",
            EntityKind::Part => "part",
            EntityKind::Inventory => "inventory item",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors surfaced by the resolution engine and query facade
#[derive(Debug, Error)]
pub enum InventoryError {
    /// A referenced natural key or surrogate id does not resolve
    #[error("{kind} '{key}' not found")]
    NotFound { kind: EntityKind, key: String },

    /// Box codes are globally unique; the code is claimed by another location
    #[error("box code '{code}' is already registered at location '{location}'")]
    CodeInUse { code: String, location: String },

    /// A delete is blocked while dependent rows still reference the entity
    #[error("{kind} '{key}' still has {children} dependent {child_kind} record(s)")]
    InUse {
        kind: EntityKind,
        key: String,
        children: usize,
        child_kind: EntityKind,
    },

    /// Input rejected before it reaches the store
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// The database file was written by an incompatible version
    #[error("unsupported database schema version {found} (expected {expected})")]
    SchemaVersion { found: i32, expected: i32 },

    #[error("io error: {0}")]
    Io(String),

    /// Store-level fault outside the guarded resolution path
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),
}

impl InventoryError {
    pub(crate) fn not_found(kind: EntityKind, key: impl Into<String>) -> Self {
        InventoryError::NotFound {
            kind,
            key: key.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
