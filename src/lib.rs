//! Partsbin: parts inventory toolkit
//!
//! Tracks parts, boxes, locations, and per-box inventory in a single-file
//! SQLite database. The `core` module owns the store and the resolution
//! engine; `cli` is the command-line transport over it.

pub mod cli;
pub mod core;
