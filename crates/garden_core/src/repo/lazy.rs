//! Deferred repository construction.
//!
//! A collection starts uninitialized and becomes ready on first access,
//! exactly once; there is no way back.

use crate::model::content::{Content, ContentItem};
use crate::repo::content_repo::{ContentRepository, RepositoryOptions};
use crate::store::ContentStore;
use log::debug;
use once_cell::unsync::Lazy;

type Loader<V, S> = Box<dyn FnOnce() -> ContentRepository<V, S>>;

/// Holds a store and seed until the collection is first touched.
pub struct LazyContentRepository<V: ContentItem + 'static, S: ContentStore + 'static> {
    collection_id: String,
    repo: Lazy<ContentRepository<V, S>, Loader<V, S>>,
}

impl<V: ContentItem + 'static, S: ContentStore + 'static> LazyContentRepository<V, S> {
    pub fn new(store: S, seed: Vec<Content<V>>) -> Self {
        Self::with_options(store, seed, RepositoryOptions::default())
    }

    pub fn with_options(store: S, seed: Vec<Content<V>>, options: RepositoryOptions) -> Self {
        let collection_id = options.resolve_collection_id::<V>();
        let loader_collection = collection_id.clone();
        let loader: Loader<V, S> = Box::new(move || {
            debug!("event=content_ready module=repo status=start collection={loader_collection}");
            ContentRepository::open_with(store, seed, options)
        });

        Self {
            collection_id,
            repo: Lazy::new(loader),
        }
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    /// Whether the load-or-seed transition has happened.
    pub fn is_ready(&self) -> bool {
        Lazy::get(&self.repo).is_some()
    }

    /// Read access; triggers loading on first call.
    pub fn get(&self) -> &ContentRepository<V, S> {
        Lazy::force(&self.repo)
    }

    /// Mutable access; triggers loading on first call.
    pub fn get_mut(&mut self) -> &mut ContentRepository<V, S> {
        &mut *self.repo
    }
}
