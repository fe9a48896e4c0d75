//! Generic content repository for the gardening reference site.
//!
//! One `ContentRepository` owns one content-type collection (techniques,
//! tools, pots, ...) and persists it through a `ContentStore`.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use logging::{init_logging, logging_status, LogLevel};
pub use model::content::{
    CommonFields, Content, ContentId, ContentItem, ContentStatus, ContentType,
    ContentValidationError, UnknownContentType,
};
pub use model::timestamp::Timestamp;
pub use model::variants::{
    Accessory, Book, Difficulty, Essential, Pot, Suggestion, Technique, Tool, Video,
};
pub use repo::content_repo::{ContentRepository, LoadOutcome, PersistError, RepositoryOptions};
pub use repo::identity::{IdGenerator, SequentialIdGenerator, TimestampIdGenerator, UuidIdGenerator};
pub use repo::lazy::LazyContentRepository;
pub use repo::patch::{ContentPatch, PatchError};
pub use seed::DefaultCatalog;
pub use store::{storage_key, ContentStore, MemoryStore, SqliteStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
