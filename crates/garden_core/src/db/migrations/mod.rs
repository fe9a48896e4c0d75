//! Ordered schema steps for the slot database.
//!
//! # Invariants
//! - Step versions start at 1 and increase by one.
//! - All pending steps commit together, or none do.

use crate::store::{StoreError, StoreResult};
use log::info;
use rusqlite::Connection;

/// One schema step: `(version, sql)`.
const SCHEMA_STEPS: &[(u32, &str)] = &[(1, include_str!("0001_content_slots.sql"))];

/// Schema version this binary migrates databases to.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |(version, _)| *version)
}

/// Brings `conn` up to `latest_version()`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database was written by a newer build.
/// - `Sqlite` when a step fails; earlier steps of this run are rolled back.
pub fn apply_migrations(conn: &mut Connection) -> StoreResult<()> {
    let found = current_user_version(conn)?;
    let target = latest_version();
    if found > target {
        return Err(StoreError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: target,
        });
    }

    let pending: Vec<&(u32, &str)> = SCHEMA_STEPS
        .iter()
        .filter(|(version, _)| *version > found)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in &pending {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from={found} to={target} steps={}",
        pending.len()
    );
    Ok(())
}

/// Schema version recorded on `conn`; `0` for a fresh database.
pub fn current_user_version(conn: &Connection) -> StoreResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}
