//! Cached domain entities.
//!
//! Entities are populated by whatever keeps the caches in sync with the
//! platform. The query layer only reads them through the [`Entity`] trait
//! and the kind-specific accessors.

mod channel;
mod channel_type;
mod emoji;

pub use channel::Channel;
pub use channel_type::{ChannelType, TypeTag};
pub use emoji::Emoji;

/// A uniquely identified cached record.
pub trait Entity: Send + Sync + 'static {
    /// Unique key of this entity within its cache.
    fn id(&self) -> &str;

    /// Display name, if the entity has one.
    fn name(&self) -> Option<&str>;
}
