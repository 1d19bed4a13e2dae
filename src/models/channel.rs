//! Guild channel model.

use serde::{Deserialize, Serialize};

use super::{ChannelType, Entity};

/// Base URL for channel links.
const CHANNEL_URL_BASE: &str = "https://discord.com/channels";

/// A cached guild channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel ID
    pub id: String,
    /// Channel name (absent for some thread/DM kinds)
    #[serde(default)]
    pub name: Option<String>,
    /// Free-text topic (text-like channels only)
    #[serde(default)]
    pub topic: Option<String>,
    /// Channel type
    #[serde(rename = "type")]
    pub kind: ChannelType,
    /// Owning guild ID
    pub guild_id: String,
    /// Parent category (or parent channel for threads)
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl Channel {
    /// Create a channel with no topic and no parent.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ChannelType,
        guild_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            topic: None,
            kind,
            guild_id: guild_id.into(),
            parent_id: None,
        }
    }

    /// Set the topic (builder pattern).
    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Set the parent ID (builder pattern).
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Link to this channel.
    pub fn url(&self) -> String {
        format!("{}/{}/{}", CHANNEL_URL_BASE, self.guild_id, self.id)
    }

    /// Mention form, `<#id>`.
    pub fn mention(&self) -> String {
        format!("<#{}>", self.id)
    }

    /// Whether this channel is a category.
    pub fn is_category(&self) -> bool {
        self.kind == ChannelType::GuildCategory
    }
}

impl Entity for Channel {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
