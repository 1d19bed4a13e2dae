//! Cache registry - Central management for all entity caches.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use super::{CacheConfig, EntityCache};
use crate::error::{Error, Result};
use crate::models::Entity;

/// Central registry for managing named entity caches.
///
/// The registry lets the code that populates caches and the code that
/// queries them meet on a name, without passing handles around.
///
/// ## Example
///
/// ```rust
/// use elysium_cache::cache::{CacheConfig, CacheRegistry, EntityCache};
/// use elysium_cache::models::Channel;
///
/// let registry = CacheRegistry::new();
///
/// // Create a cache for channels
/// let channels: EntityCache<Channel> = registry.create("channels", CacheConfig::channels()).unwrap();
///
/// // Later, retrieve the same cache
/// let channels: EntityCache<Channel> = registry.get("channels").unwrap().unwrap();
/// ```
#[derive(Clone)]
pub struct CacheRegistry {
    caches: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

/// Internal cache entry storing type-erased cache.
struct CacheEntry {
    cache: Box<dyn Any + Send + Sync>,
    type_id: TypeId,
    type_name: &'static str,
}

impl CacheEntry {
    fn downcast<E: Entity>(&self, name: &str) -> Result<EntityCache<E>> {
        if self.type_id != TypeId::of::<EntityCache<E>>() {
            return Err(Error::CacheTypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<EntityCache<E>>(),
                actual: self.type_name,
            });
        }
        self.cache
            .downcast_ref::<EntityCache<E>>()
            .cloned()
            .ok_or_else(|| Error::CacheTypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<EntityCache<E>>(),
                actual: self.type_name,
            })
    }
}

impl CacheRegistry {
    /// Create a new empty cache registry.
    pub fn new() -> Self {
        info!("Cache registry initialized");
        Self {
            caches: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a new entity cache and register it.
    ///
    /// If a cache with the same name and entity type already exists, that
    /// cache is returned instead.
    ///
    /// # Errors
    /// Returns [`Error::CacheTypeMismatch`] if the name is taken by a cache
    /// of another entity type.
    pub fn create<E: Entity>(&self, name: &str, config: CacheConfig) -> Result<EntityCache<E>> {
        let mut caches = self.caches.write();

        if let Some(existing) = caches.get(name) {
            return existing.downcast(name);
        }

        debug!("Creating cache: {}", name);

        let cache = EntityCache::new(name, config);
        caches.insert(
            name.to_string(),
            CacheEntry {
                cache: Box::new(cache.clone()),
                type_id: TypeId::of::<EntityCache<E>>(),
                type_name: std::any::type_name::<EntityCache<E>>(),
            },
        );

        Ok(cache)
    }

    /// Get an existing cache by name.
    ///
    /// Returns `Ok(None)` if the cache doesn't exist.
    ///
    /// # Errors
    /// Returns [`Error::CacheTypeMismatch`] if the cache holds another entity type.
    pub fn get<E: Entity>(&self, name: &str) -> Result<Option<EntityCache<E>>> {
        let caches = self.caches.read();
        caches.get(name).map(|entry| entry.downcast(name)).transpose()
    }

    /// Get an existing cache or create a new one if it doesn't exist.
    ///
    /// This is the recommended way to reach a cache.
    pub fn get_or_create<E: Entity>(&self, name: &str, config: CacheConfig) -> Result<EntityCache<E>> {
        if let Some(cache) = self.get(name)? {
            return Ok(cache);
        }
        self.create(name, config)
    }

    /// Check if a cache with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.caches.read().contains_key(name)
    }

    /// Remove a cache from the registry.
    ///
    /// Returns `true` if the cache was removed. Handles already given out
    /// keep working.
    pub fn remove(&self, name: &str) -> bool {
        let removed = self.caches.write().remove(name).is_some();
        if removed {
            debug!("Removed cache: {}", name);
        }
        removed
    }

    /// Get the number of registered caches.
    pub fn len(&self) -> usize {
        self.caches.read().len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.caches.read().is_empty()
    }

    /// Get a sorted list of all registered cache names.
    pub fn cache_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.caches.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for CacheRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let caches = self.caches.read();
        f.debug_struct("CacheRegistry")
            .field("cache_count", &caches.len())
            .field("cache_names", &caches.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Channel, ChannelType, Emoji};

    #[test]
    fn test_get_or_create_returns_same_cache() {
        let registry = CacheRegistry::new();
        let first = registry.get_or_create::<Emoji>("emojis", CacheConfig::emojis()).unwrap();
        first.insert(Emoji::new("1", "blob", "g"));

        let second = registry.get_or_create::<Emoji>("emojis", CacheConfig::emojis()).unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let registry = CacheRegistry::new();
        registry.create::<Emoji>("shared", CacheConfig::default()).unwrap();

        let result = registry.get::<Channel>("shared");
        assert!(matches!(result, Err(Error::CacheTypeMismatch { .. })));
        let result = registry.create::<Channel>("shared", CacheConfig::default());
        assert!(matches!(result, Err(Error::CacheTypeMismatch { .. })));
    }

    #[test]
    fn test_remove_and_names() {
        let registry = CacheRegistry::new();
        let channels = registry.create::<Channel>("channels", CacheConfig::channels()).unwrap();
        registry.create::<Emoji>("emojis", CacheConfig::emojis()).unwrap();
        assert_eq!(registry.cache_names(), ["channels", "emojis"]);

        assert!(registry.remove("channels"));
        assert!(!registry.contains("channels"));
        assert!(registry.get::<Channel>("channels").unwrap().is_none());

        channels.insert(Channel::new("1", "general", ChannelType::GuildText, "g"));
        assert_eq!(channels.len(), 1);
    }
}
