//! JSON snapshots of cache contents.
//!
//! A snapshot is what the process that keeps caches in sync hands over:
//! every channel and emoji, in cache order.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cache::{CacheConfig, CacheRegistry, EntityCache};
use crate::error::{Error, Result};
use crate::models::{Channel, Emoji};

/// Registry name of the channel cache.
pub const CHANNELS: &str = "channels";
/// Registry name of the emoji cache.
pub const EMOJIS: &str = "emojis";

/// Serialized cache contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub emojis: Vec<Emoji>,
}

/// Caches filled from a snapshot.
#[derive(Debug, Clone)]
pub struct Populated {
    pub channels: EntityCache<Channel>,
    pub emojis: EntityCache<Emoji>,
}

impl FromStr for Snapshot {
    type Err = Error;

    /// Parse a snapshot from a JSON string.
    fn from_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Snapshot {
    /// Read and parse a snapshot file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::SnapshotIo {
            path: path.to_path_buf(),
            source,
        })?;
        json.parse()
    }

    /// Load the snapshot into the registry's channel and emoji caches.
    ///
    /// Caches are created if missing, sized from `capacity` when given and
    /// from the per-kind defaults otherwise. Entities already cached under
    /// the same id are replaced.
    pub fn populate(self, registry: &CacheRegistry, capacity: Option<usize>) -> Result<Populated> {
        let channel_config = capacity.map_or_else(CacheConfig::channels, CacheConfig::with_capacity);
        let emoji_config = capacity.map_or_else(CacheConfig::emojis, CacheConfig::with_capacity);

        let channels = registry.get_or_create::<Channel>(CHANNELS, channel_config)?;
        let emojis = registry.get_or_create::<Emoji>(EMOJIS, emoji_config)?;

        channels.extend(self.channels);
        emojis.extend(self.emojis);

        info!(
            "Snapshot loaded: {} channels, {} emojis",
            channels.len(),
            emojis.len()
        );

        Ok(Populated { channels, emojis })
    }
}
