//! SQLite bootstrap for the content slot database.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Slots are never read or written on a connection that is not migrated.
//! - Failures are reported as `StoreError`, the same type the slot store uses.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
