//! Generic content repository over one content-type collection.
//!
//! # Responsibility
//! - Load a collection from the persistence port or fall back to seed data.
//! - Serve CRUD and query calls with id/timestamp bookkeeping.
//! - Write the full collection back after every effective mutation.
//!
//! # Invariants
//! - Ids are pairwise distinct within the collection.
//! - `created_at` never changes; `updated_at >= created_at` always.
//! - Insertion order is preserved and is the iteration order.
//! - Store failures never surface as errors; the in-memory collection stays
//!   authoritative for the session.
//! - Single writer: concurrent copies over one slot are last-writer-wins.

use crate::clock::{Clock, SystemClock};
use crate::model::content::{Content, ContentId, ContentItem, ContentValidationError};
use crate::repo::identity::{IdGenerator, UuidIdGenerator};
use crate::repo::patch::{ContentPatch, PatchError};
use crate::store::{storage_key, ContentStore, StoreError};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const MAX_ID_ATTEMPTS: usize = 16;

/// How the working collection was obtained at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Persisted state parsed and validated; seed data discarded.
    Restored { count: usize },
    /// Slot was empty; seed data used.
    Seeded,
    /// Slot could not be read or parsed; seed data used.
    SeededAfterError { reason: String },
}

impl LoadOutcome {
    pub fn is_restored(&self) -> bool {
        matches!(self, Self::Restored { .. })
    }
}

/// Why the last write-back did not reach the store.
#[derive(Debug)]
pub enum PersistError {
    Encode(serde_json::Error),
    Store(StoreError),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

/// Payload decode failure.
#[derive(Debug)]
enum DecodeError {
    Malformed(serde_json::Error),
    Invalid(ContentValidationError),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed payload: {err}"),
            Self::Invalid(err) => write!(f, "invalid payload: {err}"),
        }
    }
}

/// Construction knobs for `ContentRepository::open_with`.
pub struct RepositoryOptions {
    collection_id: Option<String>,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            collection_id: None,
            ids: Box::new(UuidIdGenerator),
            clock: Box::new(SystemClock),
        }
    }
}

impl RepositoryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the collection identifier (defaults to the variant's type).
    pub fn collection_id(mut self, collection_id: impl Into<String>) -> Self {
        self.collection_id = Some(collection_id.into());
        self
    }

    pub(crate) fn resolve_collection_id<V: ContentItem>(&self) -> String {
        self.collection_id
            .clone()
            .unwrap_or_else(|| V::CONTENT_TYPE.as_str().to_string())
    }

    pub fn id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }
}

/// CRUD + query engine over one collection of variant `V`, persisted in `S`.
pub struct ContentRepository<V: ContentItem, S: ContentStore> {
    collection_id: String,
    storage_key: String,
    items: Vec<Content<V>>,
    store: S,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    load_outcome: LoadOutcome,
    last_save_error: Option<PersistError>,
}

impl<V: ContentItem, S: ContentStore> ContentRepository<V, S> {
    /// Opens the `V::CONTENT_TYPE` collection with default id generator/clock.
    pub fn open(store: S, seed: Vec<Content<V>>) -> Self {
        Self::open_with(store, seed, RepositoryOptions::default())
    }

    /// Loads persisted state for the collection, or falls back to `seed`.
    ///
    /// Never fails: unreadable or invalid persisted state is reported through
    /// a `warn` event and `load_outcome()`.
    pub fn open_with(store: S, seed: Vec<Content<V>>, options: RepositoryOptions) -> Self {
        let collection_id = options.resolve_collection_id::<V>();
        let storage_key = storage_key(&collection_id);
        let (items, load_outcome) = load_or_seed(&store, &collection_id, &storage_key, seed);

        Self {
            collection_id,
            storage_key,
            items,
            store,
            ids: options.ids,
            clock: options.clock,
            load_outcome,
            last_save_error: None,
        }
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    /// Error from the most recent write-back, cleared by the next success.
    pub fn last_save_error(&self) -> Option<&PersistError> {
        self.last_save_error.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Appends a new entity with a fresh id and `createdAt == updatedAt == now`.
    pub fn create(&mut self, item: V) -> Content<V> {
        let id = self.fresh_id();
        let content = Content::new(id, self.clock.now(), item);
        self.items.push(content.clone());
        debug!(
            "event=content_create module=repo status=ok collection={} id={}",
            self.collection_id,
            content.id()
        );
        self.persist("create");
        content
    }

    /// Shallow-merges `patch` into the entity with `id` and bumps `updatedAt`.
    ///
    /// Returns `Ok(None)` without touching anything when `id` is absent.
    ///
    /// # Errors
    /// - `PatchError` when the merged fields do not form a valid `V`; the
    ///   collection is left unchanged.
    pub fn update(
        &mut self,
        id: &str,
        patch: &ContentPatch,
    ) -> Result<Option<Content<V>>, PatchError> {
        let Some(index) = self.position(id) else {
            debug!(
                "event=content_update module=repo status=noop collection={} id={id}",
                self.collection_id
            );
            return Ok(None);
        };

        let merged = patch.apply(&self.items[index].item)?;
        let now = self.clock.now();
        let entry = &mut self.items[index];
        entry.item = merged;
        entry.touch(now);
        let updated = entry.clone();

        debug!(
            "event=content_update module=repo status=ok collection={} id={id} fields={}",
            self.collection_id,
            patch.len()
        );
        self.persist("update");
        Ok(Some(updated))
    }

    /// Drops the entity with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|content| content.id() != id);
        if self.items.len() == before {
            debug!(
                "event=content_remove module=repo status=noop collection={} id={id}",
                self.collection_id
            );
            return false;
        }

        debug!(
            "event=content_remove module=repo status=ok collection={} id={id}",
            self.collection_id
        );
        self.persist("remove");
        true
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Content<V>> {
        self.items.iter().find(|content| content.id() == id)
    }

    /// Full collection in insertion order.
    pub fn list(&self) -> &[Content<V>] {
        &self.items
    }

    /// Published entities, in collection order.
    pub fn get_published(&self) -> Vec<&Content<V>> {
        self.items
            .iter()
            .filter(|content| content.is_published())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|content| content.id() == id)
    }

    fn fresh_id(&mut self) -> ContentId {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id();
            if !candidate.trim().is_empty() && self.position(&candidate).is_none() {
                return candidate;
            }
            warn!(
                "event=content_id module=repo status=collision collection={} id={candidate}",
                self.collection_id
            );
        }

        // Generator keeps colliding; a random suffix still yields a usable id.
        let mut candidate = format!("{}-{}", self.ids.next_id(), Uuid::new_v4());
        while self.position(&candidate).is_some() {
            candidate = Uuid::new_v4().to_string();
        }
        candidate
    }

    fn persist(&mut self, operation: &str) {
        let result = serde_json::to_string(&self.items)
            .map_err(PersistError::Encode)
            .and_then(|payload| {
                self.store
                    .save(&self.storage_key, &payload)
                    .map_err(PersistError::Store)
            });

        match result {
            Ok(()) => {
                self.last_save_error = None;
            }
            Err(err) => {
                warn!(
                    "event=content_persist module=repo status=error collection={} op={operation} count={} error={err}",
                    self.collection_id,
                    self.items.len()
                );
                self.last_save_error = Some(err);
            }
        }
    }
}

fn load_or_seed<V: ContentItem, S: ContentStore>(
    store: &S,
    collection_id: &str,
    key: &str,
    seed: Vec<Content<V>>,
) -> (Vec<Content<V>>, LoadOutcome) {
    let failure = match store.load(key) {
        Ok(Some(payload)) => match decode_collection::<V>(&payload) {
            Ok(items) => {
                info!(
                    "event=content_load module=repo status=ok source=store collection={collection_id} count={}",
                    items.len()
                );
                let count = items.len();
                return (items, LoadOutcome::Restored { count });
            }
            Err(err) => err.to_string(),
        },
        Ok(None) => {
            let seed = dedupe_seed(collection_id, seed);
            info!(
                "event=content_load module=repo status=ok source=seed collection={collection_id} count={}",
                seed.len()
            );
            return (seed, LoadOutcome::Seeded);
        }
        Err(err) => err.to_string(),
    };

    warn!(
        "event=content_load module=repo status=error source=seed collection={collection_id} error={failure}"
    );
    (
        dedupe_seed(collection_id, seed),
        LoadOutcome::SeededAfterError { reason: failure },
    )
}

fn decode_collection<V: ContentItem>(payload: &str) -> Result<Vec<Content<V>>, DecodeError> {
    let items: Vec<Content<V>> = serde_json::from_str(payload).map_err(DecodeError::Malformed)?;
    {
        let mut seen = HashSet::with_capacity(items.len());
        for content in &items {
            content.validate().map_err(DecodeError::Invalid)?;
            if !seen.insert(content.id()) {
                return Err(DecodeError::Invalid(ContentValidationError::DuplicateId(
                    content.id().to_string(),
                )));
            }
        }
    }
    Ok(items)
}

/// Keeps the first occurrence of each seed id.
fn dedupe_seed<V: ContentItem>(collection_id: &str, seed: Vec<Content<V>>) -> Vec<Content<V>> {
    let mut seen = HashSet::with_capacity(seed.len());
    let before = seed.len();
    let kept: Vec<Content<V>> = seed
        .into_iter()
        .filter(|content| seen.insert(content.id().to_string()))
        .collect();
    if kept.len() != before {
        warn!(
            "event=content_seed module=repo status=deduplicated collection={collection_id} dropped={}",
            before - kept.len()
        );
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::{decode_collection, ContentRepository, LoadOutcome, RepositoryOptions};
    use crate::clock::ManualClock;
    use crate::model::content::{CommonFields, Content, ContentStatus};
    use crate::model::timestamp::Timestamp;
    use crate::model::variants::Essential;
    use crate::repo::identity::IdGenerator;
    use crate::store::MemoryStore;

    struct StuckIds;

    impl IdGenerator for StuckIds {
        fn next_id(&mut self) -> String {
            "same".to_string()
        }
    }

    fn compost(status: ContentStatus) -> Essential {
        Essential {
            common: CommonFields::new("Compost", "Rich mix", "compost.png", status),
            category: "soil".to_string(),
            price: 9.99,
            stock: 40,
        }
    }

    #[test]
    fn stuck_generator_still_yields_unique_ids() {
        let mut repo = ContentRepository::<Essential, _>::open_with(
            MemoryStore::new(),
            Vec::new(),
            RepositoryOptions::new().id_generator(StuckIds),
        );

        let first = repo.create(compost(ContentStatus::Draft));
        let second = repo.create(compost(ContentStatus::Draft));
        let third = repo.create(compost(ContentStatus::Draft));

        assert_eq!(first.id(), "same");
        assert!(second.id().starts_with("same-"));
        assert_ne!(second.id(), third.id());
    }

    #[test]
    fn decode_rejects_duplicate_ids() {
        let at = Timestamp::from_epoch_millis(0).unwrap();
        let items = vec![
            Content::new("a", at, compost(ContentStatus::Draft)),
            Content::new("a", at, compost(ContentStatus::Published)),
        ];
        let payload = serde_json::to_string(&items).unwrap();

        let err = decode_collection::<Essential>(&payload).unwrap_err();
        assert!(err.to_string().contains("duplicate content id `a`"));
    }

    #[test]
    fn duplicate_seed_ids_keep_first_occurrence() {
        let at = Timestamp::from_epoch_millis(0).unwrap();
        let seed = vec![
            Content::new("a", at, compost(ContentStatus::Draft)),
            Content::new("a", at, compost(ContentStatus::Published)),
        ];

        let repo = ContentRepository::open(MemoryStore::new(), seed);
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.list()[0].status(), ContentStatus::Draft);
        assert_eq!(repo.load_outcome(), &LoadOutcome::Seeded);
    }

    #[test]
    fn update_never_moves_updated_at_backwards() {
        let clock = ManualClock::new(Timestamp::from_epoch_millis(10_000).unwrap());
        let mut repo = ContentRepository::<Essential, _>::open_with(
            MemoryStore::new(),
            Vec::new(),
            RepositoryOptions::new().clock(clock.clone()),
        );
        let created = repo.create(compost(ContentStatus::Draft));

        clock.advance_millis(-5_000);
        let updated = repo
            .update(created.id(), &crate::repo::patch::ContentPatch::new())
            .unwrap()
            .unwrap();

        assert_eq!(updated.created_at(), created.created_at());
        assert_eq!(updated.updated_at(), created.updated_at());
    }
}
