//! Shared entity store guarded by a reader/writer lock.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use tracing::trace;

use super::{CacheConfig, Collection};
use crate::models::Entity;

/// A consistent read-only view of an [`EntityCache`].
///
/// Writers block while a view is alive, so everything read through one view
/// comes from the same state of the cache.
pub type CacheView<'a, E> = RwLockReadGuard<'a, Collection<E>>;

/// A named, insertion-ordered cache of entities keyed by id.
///
/// This cache is:
/// - Thread-safe (lock shared through an Arc)
/// - Clone-friendly (cloning is cheap, shares the same underlying store)
/// - Written only by its owner; query handles only take views
pub struct EntityCache<E> {
    inner: Arc<RwLock<Collection<E>>>,
    name: Arc<str>,
}

// Manual Clone implementation that doesn't require E: Clone
impl<E> Clone for EntityCache<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            name: Arc::clone(&self.name),
        }
    }
}

impl<E: Entity> EntityCache<E> {
    /// Create a new empty cache with the given name and config.
    pub fn new(name: impl Into<Arc<str>>, config: CacheConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Collection::with_capacity(config.initial_capacity))),
            name: name.into(),
        }
    }

    /// Get the name of this cache.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert an entity, replacing any entity with the same id in place.
    pub fn insert(&self, entity: E) -> Option<Arc<E>> {
        self.insert_arc(Arc::new(entity))
    }

    /// Insert an already shared entity.
    pub fn insert_arc(&self, entity: Arc<E>) -> Option<Arc<E>> {
        trace!("{}: insert {}", self.name, entity.id());
        self.inner.write().insert(entity)
    }

    /// Insert many entities under a single write lock.
    pub fn extend<I>(&self, entities: I)
    where
        I: IntoIterator<Item = E>,
    {
        let mut guard = self.inner.write();
        guard.extend(entities.into_iter().map(Arc::new));
        trace!("{}: extended to {} entries", self.name, guard.len());
    }

    /// Remove an entity by id.
    pub fn remove(&self, id: &str) -> Option<Arc<E>> {
        trace!("{}: remove {}", self.name, id);
        self.inner.write().remove(id)
    }

    /// Remove all entities from the cache.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Take a consistent read view of the cache.
    ///
    /// Hold it for the whole of one query and drop it promptly; writers
    /// wait until it is released.
    pub fn view(&self) -> CacheView<'_, E> {
        self.inner.read()
    }

    /// Get an entity by id.
    pub fn get(&self, id: &str) -> Option<Arc<E>> {
        self.view().get(id).cloned()
    }

    /// First entity (in insertion order) satisfying the predicate.
    pub fn find<P>(&self, predicate: P) -> Option<Arc<E>>
    where
        P: FnMut(&E) -> bool,
    {
        self.view().find(predicate)
    }

    /// Every entity satisfying the predicate, as an independent collection.
    pub fn filter<P>(&self, predicate: P) -> Collection<E>
    where
        P: FnMut(&E) -> bool,
    {
        self.view().filter(predicate)
    }
}

impl<E: Entity> std::fmt::Debug for EntityCache<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityCache")
            .field("name", &self.name)
            .field("entry_count", &self.inner.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Emoji;

    #[test]
    fn test_clones_share_storage() {
        let cache = EntityCache::new("emojis", CacheConfig::default());
        let handle = cache.clone();

        cache.insert(Emoji::new("1", "blob", "g"));
        assert_eq!(handle.len(), 1);
        assert_eq!(handle.get("1").unwrap().name.as_deref(), Some("blob"));

        handle.remove("1");
        assert!(cache.is_empty());
    }

    #[test]
    fn test_filter_does_not_alias_cache() {
        let cache = EntityCache::new("emojis", CacheConfig::default());
        cache.extend([Emoji::new("1", "a", "g"), Emoji::new("2", "b", "g")]);

        let mut all = cache.filter(|_| true);
        all.remove("1");

        assert_eq!(all.len(), 1);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_view_blocks_writers() {
        use std::thread;
        use std::time::Duration;

        let cache = EntityCache::new("emojis", CacheConfig::default());
        cache.insert(Emoji::new("1", "a", "g"));

        let view = cache.view();
        let writer = {
            let cache = cache.clone();
            thread::spawn(move || {
                cache.insert(Emoji::new("2", "b", "g"));
            })
        };

        thread::sleep(Duration::from_millis(50));
        assert_eq!(view.len(), 1);
        assert!(view.get("2").is_none());

        drop(view);
        writer.join().unwrap();
        assert_eq!(cache.len(), 2);
    }
}
