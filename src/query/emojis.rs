//! Emoji-specific queries: flag pairs and ownership.

use super::Manager;
use crate::cache::Collection;
use crate::models::Emoji;

/// Query handle for guild emojis.
pub type EmojiManager = Manager<Emoji>;

impl Manager<Emoji> {
    /// Every emoji uploaded by the given user.
    pub fn filter_by_author_id(&self, author_id: &str) -> Collection<Emoji> {
        self.cache()
            .filter(|emoji| emoji.author_id.as_deref() == Some(author_id))
    }

    /// Every emoji of the given guild.
    pub fn filter_by_guild_id(&self, guild_id: &str) -> Collection<Emoji> {
        self.cache().filter(|emoji| emoji.guild_id == guild_id)
    }

    pub fn filter_animateds(&self) -> Collection<Emoji> {
        self.cache().filter(|emoji| emoji.animated)
    }

    pub fn filter_statics(&self) -> Collection<Emoji> {
        self.cache().filter(|emoji| !emoji.animated)
    }

    pub fn filter_availables(&self) -> Collection<Emoji> {
        self.cache().filter(|emoji| emoji.available)
    }

    pub fn filter_unavailables(&self) -> Collection<Emoji> {
        self.cache().filter(|emoji| !emoji.available)
    }

    pub fn filter_deletables(&self) -> Collection<Emoji> {
        self.cache().filter(|emoji| emoji.deletable)
    }

    pub fn filter_undeletables(&self) -> Collection<Emoji> {
        self.cache().filter(|emoji| !emoji.deletable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheConfig, EntityCache};

    fn manager() -> EmojiManager {
        let cache = EntityCache::new("emojis", CacheConfig::emojis());
        let mut wave = Emoji::new("2", "wave", "100");
        wave.animated = true;
        wave.author_id = Some("7".to_string());
        let mut gone = Emoji::new("3", "gone", "200");
        gone.available = false;
        gone.deletable = true;
        cache.extend([Emoji::new("1", "blob", "100"), wave, gone]);
        Manager::new(cache)
    }

    #[test]
    fn test_flag_pairs() {
        let manager = manager();
        assert_eq!(manager.filter_animateds().keys().collect::<Vec<_>>(), ["2"]);
        assert_eq!(manager.filter_statics().keys().collect::<Vec<_>>(), ["1", "3"]);
        assert_eq!(manager.filter_unavailables().keys().collect::<Vec<_>>(), ["3"]);
        assert_eq!(manager.filter_availables().len(), 2);
        assert_eq!(manager.filter_deletables().keys().collect::<Vec<_>>(), ["3"]);
        assert_eq!(manager.filter_undeletables().len(), 2);
    }

    #[test]
    fn test_relations() {
        let manager = manager();
        assert_eq!(manager.filter_by_author_id("7").keys().collect::<Vec<_>>(), ["2"]);
        assert!(manager.filter_by_author_id("8").is_empty());
        assert_eq!(manager.filter_by_guild_id("100").len(), 2);
    }
}
