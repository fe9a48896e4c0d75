//! Persistence port for content collections.
//!
//! # Responsibility
//! - Define the key/value load/save contract the repository depends on.
//! - Provide an in-memory double and a SQLite-backed adapter.
//!
//! # Invariants
//! - One slot per content-type key; slots are fully independent.
//! - Payloads are opaque strings to the store.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use std::sync::Arc;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

const STORAGE_KEY_PREFIX: &str = "garden.content.";

/// Returns the stable slot key for a content-type identifier.
pub fn storage_key(collection_id: &str) -> String {
    format!("{STORAGE_KEY_PREFIX}{collection_id}")
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a persistence adapter.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// Slot database was written by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Wrapped connection was never migrated to this build's schema.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Payload larger than the adapter is willing to hold.
    QuotaExceeded {
        key: String,
        size: usize,
        quota: usize,
    },
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "slot database error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "slot database schema {db_version} is newer than this build supports ({latest_supported})"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "content store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::QuotaExceeded { key, size, quota } => write!(
                f,
                "payload for `{key}` is {size} bytes, exceeding the {quota} byte quota"
            ),
            Self::Unavailable(message) => write!(f, "content store unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Key/value persistence boundary.
pub trait ContentStore {
    /// Returns the payload stored under `key`, or `None` for an empty slot.
    fn load(&self, key: &str) -> StoreResult<Option<String>>;
    /// Replaces the payload stored under `key`.
    fn save(&self, key: &str, payload: &str) -> StoreResult<()>;
    /// Deletes the slot. Administrative only; repositories never call it.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<S: ContentStore + ?Sized> ContentStore for &S {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, payload: &str) -> StoreResult<()> {
        (**self).save(key, payload)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

impl<S: ContentStore + ?Sized> ContentStore for Rc<S> {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, payload: &str) -> StoreResult<()> {
        (**self).save(key, payload)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

impl<S: ContentStore + ?Sized> ContentStore for Arc<S> {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, payload: &str) -> StoreResult<()> {
        (**self).save(key, payload)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
