//! Insertion-ordered id → entity map.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::models::Entity;

/// An ordered map from entity id to entity.
///
/// Backs every [`EntityCache`](super::EntityCache) and is also the type of
/// every multi-result query. A result collection holds its own `Arc`s, so
/// mutating it never touches the cache it was built from.
pub struct Collection<E> {
    entries: Vec<Arc<E>>,
    index: HashMap<String, usize>,
}

// Manual Clone implementation that doesn't require E: Clone
impl<E> Clone for Collection<E> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            index: self.index.clone(),
        }
    }
}

impl<E> Default for Collection<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<E: Entity> Collection<E> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collection with room for `capacity` entities.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Insert an entity under its own id.
    ///
    /// An entity with an id already present replaces the old one in place,
    /// keeping its original position. Returns the replaced entity.
    pub fn insert(&mut self, entity: Arc<E>) -> Option<Arc<E>> {
        match self.index.get(entity.id()) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos], entity)),
            None => {
                self.index.insert(entity.id().to_string(), self.entries.len());
                self.entries.push(entity);
                None
            }
        }
    }

    /// Remove the entity with the given id, preserving the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<Arc<E>> {
        let pos = self.index.remove(id)?;
        let removed = self.entries.remove(pos);
        for entity in &self.entries[pos..] {
            if let Some(slot) = self.index.get_mut(entity.id()) {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// Remove every entity.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Get the entity with the given id.
    pub fn get(&self, id: &str) -> Option<&Arc<E>> {
        self.index.get(id).map(|&pos| &self.entries[pos])
    }

    /// Check if an entity with the given id exists.
    pub fn contains_key(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entities in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<E>> {
        self.entries.iter()
    }

    /// Iterate ids in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entity| entity.id())
    }

    /// First entity (in order) satisfying the predicate.
    pub fn find<P>(&self, mut predicate: P) -> Option<Arc<E>>
    where
        P: FnMut(&E) -> bool,
    {
        self.entries.iter().find(|entity| predicate(entity)).cloned()
    }

    /// New collection of every entity satisfying the predicate, in order.
    pub fn filter<P>(&self, mut predicate: P) -> Collection<E>
    where
        P: FnMut(&E) -> bool,
    {
        self.entries
            .iter()
            .filter(|entity| predicate(entity))
            .cloned()
            .collect()
    }
}

impl<E: Entity> FromIterator<Arc<E>> for Collection<E> {
    fn from_iter<I: IntoIterator<Item = Arc<E>>>(iter: I) -> Self {
        let mut collection = Collection::new();
        collection.extend(iter);
        collection
    }
}

impl<E: Entity> Extend<Arc<E>> for Collection<E> {
    fn extend<I: IntoIterator<Item = Arc<E>>>(&mut self, iter: I) {
        for entity in iter {
            self.insert(entity);
        }
    }
}

impl<'a, E> IntoIterator for &'a Collection<E> {
    type Item = &'a Arc<E>;
    type IntoIter = std::slice::Iter<'a, Arc<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<E> IntoIterator for Collection<E> {
    type Item = Arc<E>;
    type IntoIter = std::vec::IntoIter<Arc<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<E: fmt::Debug> fmt::Debug for Collection<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}
