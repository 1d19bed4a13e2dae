//! Query layer over entity caches.
//!
//! A [`Manager`] wraps one [`EntityCache`](crate::cache::EntityCache) and
//! answers lookups, filters and searches against it without ever writing.
//!
//! ## Usage
//!
//! ```rust
//! use elysium_cache::cache::{CacheConfig, EntityCache};
//! use elysium_cache::models::{Channel, ChannelType};
//! use elysium_cache::query::{ChannelManager, Criteria};
//!
//! let cache = EntityCache::new("channels", CacheConfig::channels());
//! cache.insert(Channel::new("1", "general", ChannelType::GuildText, "100"));
//!
//! let channels = ChannelManager::new(cache);
//! assert!(channels.search_by("<#1>").is_some());
//! assert!(channels.search_by(Criteria::new().name("GENERAL")).is_some());
//! ```

mod channels;
mod emojis;
mod manager;
mod terms;

pub use channels::ChannelManager;
pub use emojis::EmojiManager;
pub use manager::{Manager, SearchOutcome};
pub use terms::{Criteria, Query, SearchTerm, TextMatch, TypeSelector};
