//! Cache module - ordered, lock-guarded entity stores.
//!
//! This module provides the storage the query layer reads from.
//! Population and eviction belong to whoever owns the cache; queries
//! never write.
//!
//! ## Architecture
//!
//! - `CacheRegistry` - Central registry holding all named entity caches
//! - `EntityCache` - Shared, insertion-ordered map from id to entity
//! - `Collection` - Ordered id → entity map, also used for query results
//! - `CacheConfig` - Per-cache sizing
//!
//! ## Usage
//!
//! ```rust
//! use elysium_cache::cache::{CacheConfig, CacheRegistry};
//! use elysium_cache::models::Emoji;
//!
//! let registry = CacheRegistry::new();
//! let emojis = registry.get_or_create::<Emoji>("emojis", CacheConfig::default()).unwrap();
//!
//! emojis.insert(Emoji::new("1", "blob", "100"));
//! assert!(emojis.get("1").is_some());
//! ```

mod collection;
mod config;
mod entity_cache;
mod registry;

pub use collection::Collection;
pub use config::CacheConfig;
pub use entity_cache::{CacheView, EntityCache};
pub use registry::CacheRegistry;
