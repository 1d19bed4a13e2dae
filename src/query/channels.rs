//! Channel-specific queries: topics, types, URLs and categories.

use std::sync::Arc;

use tracing::{trace, warn};
use url::Url;

use super::{Manager, TextMatch, TypeSelector};
use crate::cache::Collection;
use crate::models::{Channel, ChannelType, TypeTag};

/// Query handle for guild channels.
pub type ChannelManager = Manager<Channel>;

/// Resolve a tag, logging and swallowing failures.
fn resolve_tag(tag: &TypeTag) -> Option<ChannelType> {
    match ChannelType::resolve(tag) {
        Ok(kind) => Some(kind),
        Err(e) => {
            warn!("Ignoring channel type: {}", e);
            None
        }
    }
}

impl Manager<Channel> {
    /// First channel whose topic equals the literal exactly or matches the
    /// pattern. Channels without a topic are skipped.
    ///
    /// Unlike names, topics are free text, so literals are compared with
    /// case intact.
    pub fn get_by_topic(&self, query: impl Into<TextMatch>) -> Option<Arc<Channel>> {
        let query = query.into();
        let found = self
            .cache()
            .find(|channel| channel.topic.as_deref().is_some_and(|topic| query.matches_exact(topic)));
        trace!("{}: get_by_topic({:?}) hit={}", self.cache().name(), query, found.is_some());
        found
    }

    /// Get a channel by id, only if it has the given type.
    pub fn get_by_id_of_type(&self, id: &str, kind: impl Into<TypeTag>) -> Option<Arc<Channel>> {
        let kind = resolve_tag(&kind.into())?;
        let found = self.get_by_id(id).filter(|channel| channel.kind == kind);
        trace!("{}: get_by_id_of_type({}, {:?}) hit={}", self.cache().name(), id, kind, found.is_some());
        found
    }

    /// Like [`get_by_name`](Manager::get_by_name), restricted to one type.
    pub fn get_by_name_of_type(
        &self,
        query: impl Into<TextMatch>,
        kind: impl Into<TypeTag>,
    ) -> Option<Arc<Channel>> {
        let kind = resolve_tag(&kind.into())?;
        let query = query.into();
        let found = self.cache().find(|channel| {
            channel.kind == kind
                && channel.name.as_deref().is_some_and(|name| query.matches_folded(name))
        });
        trace!(
            "{}: get_by_name_of_type({:?}, {:?}) hit={}",
            self.cache().name(),
            query,
            kind,
            found.is_some()
        );
        found
    }

    /// Like [`get_by_topic`](Self::get_by_topic), restricted to one type.
    pub fn get_by_topic_of_type(
        &self,
        query: impl Into<TextMatch>,
        kind: impl Into<TypeTag>,
    ) -> Option<Arc<Channel>> {
        let kind = resolve_tag(&kind.into())?;
        let query = query.into();
        let found = self.cache().find(|channel| {
            channel.kind == kind
                && channel.topic.as_deref().is_some_and(|topic| query.matches_exact(topic))
        });
        trace!(
            "{}: get_by_topic_of_type({:?}, {:?}) hit={}",
            self.cache().name(),
            query,
            kind,
            found.is_some()
        );
        found
    }

    /// Every channel whose type is one of the selected types.
    ///
    /// Tags that fail to resolve select nothing; the rest still apply.
    pub fn get_by_types(&self, types: impl Into<TypeSelector>) -> Collection<Channel> {
        let selector: TypeSelector = types.into();
        let wanted: Vec<ChannelType> = selector.tags().iter().filter_map(resolve_tag).collect();
        if wanted.is_empty() {
            return Collection::new();
        }
        let found = self.cache().filter(|channel| wanted.contains(&channel.kind));
        trace!("{}: get_by_types({:?}) found {}", self.cache().name(), wanted, found.len());
        found
    }

    /// Get a channel by its link.
    ///
    /// The link is parsed first, so host case and default ports don't
    /// matter. Unparseable links match nothing.
    pub fn get_by_url(&self, url: &str) -> Option<Arc<Channel>> {
        let wanted = match Url::parse(url.trim()) {
            Ok(parsed) => parsed,
            Err(e) => {
                trace!("get_by_url: not a URL {:?}: {}", url, e);
                return None;
            }
        };
        let found = self.cache().find(|channel| {
            Url::parse(&channel.url()).is_ok_and(|candidate| candidate == wanted)
        });
        trace!("{}: get_by_url({}) hit={}", self.cache().name(), wanted, found.is_some());
        found
    }

    /// Get a category by id. Channels of other types are not returned.
    pub fn get_category_by_id(&self, id: &str) -> Option<Arc<Channel>> {
        let found = self.get_by_id(id).filter(|channel| channel.is_category());
        trace!("{}: get_category_by_id({}) hit={}", self.cache().name(), id, found.is_some());
        found
    }

    /// First category whose name matches.
    pub fn get_category_by_name(&self, query: impl Into<TextMatch>) -> Option<Arc<Channel>> {
        self.get_by_name_of_type(query, ChannelType::GuildCategory)
    }

    /// Every channel directly under the given parent.
    pub fn filter_by_parent_id(&self, parent_id: &str) -> Collection<Channel> {
        self.cache()
            .filter(|channel| channel.parent_id.as_deref() == Some(parent_id))
    }

    /// Every channel of the given guild.
    pub fn filter_by_guild_id(&self, guild_id: &str) -> Collection<Channel> {
        self.cache().filter(|channel| channel.guild_id == guild_id)
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::*;
    use crate::cache::{CacheConfig, EntityCache};

    fn manager() -> ChannelManager {
        let cache = EntityCache::new("channels", CacheConfig::channels());
        cache.extend([
            Channel::new("10", "Text Channels", ChannelType::GuildCategory, "1"),
            Channel::new("11", "general", ChannelType::GuildText, "1")
                .with_topic("Chat")
                .with_parent("10"),
            Channel::new("12", "voice", ChannelType::GuildVoice, "1").with_parent("10"),
            Channel::new("13", "general", ChannelType::GuildForum, "1").with_topic("Chat"),
        ]);
        Manager::new(cache)
    }

    #[test]
    fn test_topic_is_case_sensitive() {
        let manager = manager();
        assert_eq!(manager.get_by_topic("Chat").unwrap().id, "11");
        assert!(manager.get_by_topic("chat").is_none());
        assert_eq!(manager.get_by_topic(Regex::new("(?i)^chat$").unwrap()).unwrap().id, "11");
    }

    #[test]
    fn test_typed_lookups() {
        let manager = manager();
        assert_eq!(manager.get_by_name_of_type("general", ChannelType::GuildForum).unwrap().id, "13");
        assert_eq!(manager.get_by_topic_of_type("Chat", "guild_forum").unwrap().id, "13");
        assert!(manager.get_by_id_of_type("11", ChannelType::GuildVoice).is_none());
        assert_eq!(manager.get_by_id_of_type("11", 0i64).unwrap().id, "11");
        assert!(manager.get_by_id_of_type("11", "NotAType").is_none());
    }

    #[test]
    fn test_get_by_types_skips_unknown_tags() {
        let manager = manager();
        let found = manager.get_by_types(vec![
            TypeTag::from(ChannelType::GuildText),
            TypeTag::from("Bogus"),
            TypeTag::from(2i64),
        ]);
        assert_eq!(found.keys().collect::<Vec<_>>(), ["11", "12"]);
        assert!(manager.get_by_types("Bogus").is_empty());
    }

    #[test]
    fn test_categories_and_relations() {
        let manager = manager();
        assert_eq!(manager.get_category_by_id("10").unwrap().id, "10");
        assert!(manager.get_category_by_id("11").is_none());
        assert_eq!(manager.get_category_by_name("text channels").unwrap().id, "10");
        assert_eq!(manager.filter_by_parent_id("10").len(), 2);
        assert_eq!(manager.filter_by_guild_id("1").len(), 4);
        assert!(manager.filter_by_guild_id("2").is_empty());
    }

    #[test]
    fn test_empty_topic_is_a_value() {
        let cache = EntityCache::new("channels", CacheConfig::channels());
        cache.extend([
            Channel::new("1", "a", ChannelType::GuildText, "1"),
            Channel::new("2", "", ChannelType::GuildText, "1").with_topic(""),
        ]);
        let manager = Manager::new(cache);

        assert_eq!(manager.get_by_topic("").unwrap().id, "2");
        assert_eq!(manager.get_by_name("").unwrap().id, "2");
        assert_eq!(manager.get_by_topic_of_type("", ChannelType::GuildText).unwrap().id, "2");
        assert!(manager.get_by_topic_of_type("", ChannelType::GuildVoice).is_none());
    }

    #[test]
    fn test_get_by_url() {
        let manager = manager();
        assert_eq!(
            manager.get_by_url("https://discord.com/channels/1/12").unwrap().id,
            "12"
        );
        assert_eq!(
            manager.get_by_url("https://DISCORD.com:443/channels/1/12").unwrap().id,
            "12"
        );
        assert!(manager.get_by_url("not a url").is_none());
        assert!(manager.get_by_url("https://discord.com/channels/2/12").is_none());
    }
}
