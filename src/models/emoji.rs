//! Guild emoji model.

use serde::{Deserialize, Serialize};

use super::Entity;

fn default_true() -> bool {
    true
}

/// A cached custom guild emoji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoji {
    /// Emoji ID
    pub id: String,
    /// Emoji name (absent for deleted emojis still referenced in cache)
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub animated: bool,
    /// Whether the emoji can currently be used (false when boosts are lost)
    #[serde(default = "default_true")]
    pub available: bool,
    /// Whether the current user may delete this emoji
    #[serde(default)]
    pub deletable: bool,
    /// Owning guild ID
    pub guild_id: String,
    /// User who uploaded the emoji, if known
    #[serde(default)]
    pub author_id: Option<String>,
}

impl Emoji {
    /// Create a static, available, non-deletable emoji.
    pub fn new(id: impl Into<String>, name: impl Into<String>, guild_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            animated: false,
            available: true,
            deletable: false,
            guild_id: guild_id.into(),
            author_id: None,
        }
    }

    /// Mention form, `<:name:id>` or `<a:name:id>` for animated emojis.
    pub fn mention(&self) -> String {
        let prefix = if self.animated { "a" } else { "" };
        format!("<{}:{}:{}>", prefix, self.name.as_deref().unwrap_or("_"), self.id)
    }
}

impl Entity for Emoji {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mention() {
        let mut emoji = Emoji::new("42", "blob", "1");
        assert_eq!(emoji.mention(), "<:blob:42>");
        emoji.animated = true;
        assert_eq!(emoji.mention(), "<a:blob:42>");
    }

    #[test]
    fn test_deserialize_defaults() {
        let emoji: Emoji = serde_json::from_str(r#"{"id":"1","guild_id":"9"}"#).unwrap();
        assert_eq!(emoji.name, None);
        assert!(emoji.available);
        assert!(!emoji.animated);
        assert!(!emoji.deletable);
    }
}
