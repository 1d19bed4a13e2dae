//! Generic query handle over an entity cache.

use std::sync::Arc;

use regex::Regex;
use tracing::{debug, trace};

use super::{Criteria, Query, SearchTerm, TextMatch};
use crate::cache::{Collection, EntityCache};
use crate::models::Entity;
use crate::utils::{fold_case, strip_mention};

/// Result of [`Manager::search`]: one optional entity for a single term,
/// a collection for a batch.
#[derive(Debug, Clone)]
pub enum SearchOutcome<E> {
    One(Option<Arc<E>>),
    Many(Collection<E>),
}

impl<E: Entity> SearchOutcome<E> {
    /// Whether the search found nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(found) => found.is_none(),
            Self::Many(found) => found.is_empty(),
        }
    }

    /// The single result, if this was a single-term search.
    pub fn into_one(self) -> Option<Arc<E>> {
        match self {
            Self::One(found) => found,
            Self::Many(_) => None,
        }
    }

    /// Every result as a collection, whatever the shape of the search.
    pub fn into_collection(self) -> Collection<E> {
        match self {
            Self::One(found) => found.into_iter().collect(),
            Self::Many(found) => found,
        }
    }
}

/// Read-only query handle for one entity cache.
///
/// Every method takes a single view of the cache for its whole run and
/// never writes to it. Multi-result methods return fresh collections.
/// Kind-specific operations live in the channel and emoji modules.
pub struct Manager<E> {
    cache: EntityCache<E>,
}

// Manual Clone implementation that doesn't require E: Clone
impl<E> Clone for Manager<E> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
        }
    }
}

impl<E: Entity> Manager<E> {
    /// Create a query handle over the given cache.
    pub fn new(cache: EntityCache<E>) -> Self {
        Self { cache }
    }

    /// The cache this handle reads from.
    pub fn cache(&self) -> &EntityCache<E> {
        &self.cache
    }

    /// Get an entity by id.
    pub fn get_by_id(&self, id: &str) -> Option<Arc<E>> {
        let found = self.cache.get(id);
        trace!("{}: get_by_id({}) hit={}", self.cache.name(), id, found.is_some());
        found
    }

    /// First entity whose name equals the literal (ignoring case) or
    /// matches the pattern. Entities without a name are skipped.
    pub fn get_by_name(&self, query: impl Into<TextMatch>) -> Option<Arc<E>> {
        let query = query.into();
        let found = self
            .cache
            .find(|entity| entity.name().is_some_and(|name| query.matches_folded(name)));
        trace!("{}: get_by_name({:?}) hit={}", self.cache.name(), query, found.is_some());
        found
    }

    /// Run a single search or a batch search.
    pub fn search(&self, query: impl Into<Query>) -> SearchOutcome<E> {
        match query.into() {
            Query::One(term) => SearchOutcome::One(self.search_by(term)),
            Query::Many(terms) => SearchOutcome::Many(self.search_by_many(terms)),
        }
    }

    /// Find one entity by id, name, mention, pattern or criteria.
    ///
    /// - text: mention decoration is stripped and the text lower-cased; it
    ///   is tried as an id first, then against lower-cased names
    /// - pattern: first entity whose name matches
    /// - criteria: the id first; the name only if the id finds nothing
    pub fn search_by(&self, term: impl Into<SearchTerm>) -> Option<Arc<E>> {
        let term = term.into();
        let view = self.cache.view();
        let found = search_term(&view, &term);
        debug!("{}: search_by({:?}) hit={}", self.cache.name(), term, found.is_some());
        found
    }

    /// Search each term in order and collect the hits by id.
    ///
    /// Terms that resolve to an entity already collected keep its first
    /// position, so the result never holds more entities than there are
    /// terms. Zero hits yields an empty collection.
    pub fn search_by_many<I, T>(&self, terms: I) -> Collection<E>
    where
        I: IntoIterator<Item = T>,
        T: Into<SearchTerm>,
    {
        let view = self.cache.view();
        let mut results = Collection::new();
        for term in terms {
            if let Some(entity) = search_term(&view, &term.into()) {
                results.insert(entity);
            }
        }
        debug!("{}: search_by_many found {}", self.cache.name(), results.len());
        results
    }
}

fn search_term<E: Entity>(view: &Collection<E>, term: &SearchTerm) -> Option<Arc<E>> {
    match term {
        SearchTerm::Text(text) => search_by_text(view, text),
        SearchTerm::Pattern(pattern) => search_by_pattern(view, pattern),
        SearchTerm::Criteria(criteria) => search_by_criteria(view, criteria),
    }
}

fn search_by_text<E: Entity>(view: &Collection<E>, text: &str) -> Option<Arc<E>> {
    let key = fold_case(&strip_mention(text));
    if let Some(entity) = view.get(&key) {
        return Some(Arc::clone(entity));
    }
    view.find(|entity| entity.name().is_some_and(|name| fold_case(name) == key))
}

fn search_by_pattern<E: Entity>(view: &Collection<E>, pattern: &Regex) -> Option<Arc<E>> {
    view.find(|entity| entity.name().is_some_and(|name| pattern.is_match(name)))
}

fn search_by_criteria<E: Entity>(view: &Collection<E>, criteria: &Criteria) -> Option<Arc<E>> {
    if let Some(id) = &criteria.id
        && let Some(entity) = view.get(id)
    {
        return Some(Arc::clone(entity));
    }

    let name = criteria.name.as_ref()?;
    view.find(|entity| entity.name().is_some_and(|candidate| name.matches_folded(candidate)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::models::Emoji;

    fn manager() -> Manager<Emoji> {
        let cache = EntityCache::new("emojis", CacheConfig::default());
        cache.extend([
            Emoji::new("1", "Blob", "g"),
            Emoji::new("2", "blob_wave", "g"),
            Emoji::new("3", "party", "g"),
        ]);
        Manager::new(cache)
    }

    #[test]
    fn test_search_text_prefers_id() {
        let manager = manager();
        manager.cache().insert(Emoji::new("4", "3", "g"));

        assert_eq!(manager.search_by("3").unwrap().id, "3");
        assert_eq!(manager.search_by("<:party:3>").unwrap().id, "3");
        assert_eq!(manager.search_by("BLOB").unwrap().id, "1");
        assert!(manager.search_by("nothing").is_none());
    }

    #[test]
    fn test_criteria_falls_back_to_name() {
        let manager = manager();
        let found = manager.search_by(Criteria::new().id("missing").name("PARTY"));
        assert_eq!(found.unwrap().id, "3");

        let found = manager.search_by(Criteria::new().id("2").name("party"));
        assert_eq!(found.unwrap().id, "2");

        assert!(manager.search_by(Criteria::new()).is_none());
    }

    #[test]
    fn test_search_many_dedupes() {
        let manager = manager();
        let found = manager.search_by_many(vec![
            SearchTerm::from("party"),
            SearchTerm::from("3"),
            SearchTerm::from(Regex::new("^blob_").unwrap()),
            SearchTerm::from("ghost"),
        ]);

        assert_eq!(found.keys().collect::<Vec<_>>(), ["3", "2"]);
    }

    #[test]
    fn test_search_outcome_shapes() {
        let manager = manager();
        assert_eq!(manager.search("party").into_one().unwrap().id, "3");
        assert_eq!(manager.search(vec!["party", "Blob"]).into_collection().len(), 2);
        assert!(manager.search(Vec::<SearchTerm>::new()).is_empty());
    }
}
