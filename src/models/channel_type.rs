//! Channel type tags and their resolution.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Canonical channel type.
///
/// Serialized as the platform's numeric code; deserialized from either the
/// code or a type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawChannelType", into = "u8")]
pub enum ChannelType {
    GuildText,
    Dm,
    GuildVoice,
    GroupDm,
    GuildCategory,
    GuildAnnouncement,
    AnnouncementThread,
    PublicThread,
    PrivateThread,
    GuildStageVoice,
    GuildDirectory,
    GuildForum,
    GuildMedia,
}

impl ChannelType {
    /// Every known type, in code order.
    pub const ALL: [ChannelType; 13] = [
        Self::GuildText,
        Self::Dm,
        Self::GuildVoice,
        Self::GroupDm,
        Self::GuildCategory,
        Self::GuildAnnouncement,
        Self::AnnouncementThread,
        Self::PublicThread,
        Self::PrivateThread,
        Self::GuildStageVoice,
        Self::GuildDirectory,
        Self::GuildForum,
        Self::GuildMedia,
    ];

    /// Platform numeric code.
    pub fn code(self) -> u8 {
        match self {
            Self::GuildText => 0,
            Self::Dm => 1,
            Self::GuildVoice => 2,
            Self::GroupDm => 3,
            Self::GuildCategory => 4,
            Self::GuildAnnouncement => 5,
            Self::AnnouncementThread => 10,
            Self::PublicThread => 11,
            Self::PrivateThread => 12,
            Self::GuildStageVoice => 13,
            Self::GuildDirectory => 14,
            Self::GuildForum => 15,
            Self::GuildMedia => 16,
        }
    }

    /// Canonical type name, e.g. `GuildText`.
    pub fn name(self) -> &'static str {
        match self {
            Self::GuildText => "GuildText",
            Self::Dm => "DM",
            Self::GuildVoice => "GuildVoice",
            Self::GroupDm => "GroupDM",
            Self::GuildCategory => "GuildCategory",
            Self::GuildAnnouncement => "GuildAnnouncement",
            Self::AnnouncementThread => "AnnouncementThread",
            Self::PublicThread => "PublicThread",
            Self::PrivateThread => "PrivateThread",
            Self::GuildStageVoice => "GuildStageVoice",
            Self::GuildDirectory => "GuildDirectory",
            Self::GuildForum => "GuildForum",
            Self::GuildMedia => "GuildMedia",
        }
    }

    /// Look up a type by its numeric code.
    pub fn from_code(code: i64) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| i64::from(kind.code()) == code)
            .ok_or(Error::UnknownChannelCode(code))
    }

    /// Look up a type by name.
    ///
    /// Matching ignores case and underscores, so `GuildText`, `guild_text`
    /// and `GUILD_TEXT` all resolve to [`ChannelType::GuildText`].
    pub fn from_name(name: &str) -> Result<Self> {
        let wanted = fold_type_name(name);
        Self::ALL
            .into_iter()
            .find(|kind| fold_type_name(kind.name()) == wanted)
            .ok_or_else(|| Error::UnknownChannelType(name.to_string()))
    }

    /// Resolve any accepted tag form to its canonical type.
    pub fn resolve(tag: &TypeTag) -> Result<Self> {
        match tag {
            TypeTag::Kind(kind) => Ok(*kind),
            TypeTag::Code(code) => Self::from_code(*code),
            TypeTag::Name(name) => Self::from_name(name),
        }
    }
}

fn fold_type_name(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<ChannelType> for u8 {
    fn from(kind: ChannelType) -> Self {
        kind.code()
    }
}

/// Wire form accepted when deserializing a [`ChannelType`].
#[derive(Deserialize)]
#[serde(untagged)]
enum RawChannelType {
    Code(i64),
    Name(String),
}

impl TryFrom<RawChannelType> for ChannelType {
    type Error = Error;

    fn try_from(raw: RawChannelType) -> Result<Self> {
        match raw {
            RawChannelType::Code(code) => Self::from_code(code),
            RawChannelType::Name(name) => Self::from_name(&name),
        }
    }
}

/// A channel type as supplied by a caller, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    Kind(ChannelType),
    Code(i64),
    Name(String),
}

impl From<ChannelType> for TypeTag {
    fn from(kind: ChannelType) -> Self {
        Self::Kind(kind)
    }
}

impl From<i64> for TypeTag {
    fn from(code: i64) -> Self {
        Self::Code(code)
    }
}

impl From<u8> for TypeTag {
    fn from(code: u8) -> Self {
        Self::Code(i64::from(code))
    }
}

impl From<&str> for TypeTag {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for TypeTag {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_names_and_codes() {
        assert_eq!(ChannelType::from_name("GuildText").unwrap(), ChannelType::GuildText);
        assert_eq!(ChannelType::from_name("guild_category").unwrap(), ChannelType::GuildCategory);
        assert_eq!(ChannelType::from_name("DM").unwrap(), ChannelType::Dm);
        assert_eq!(ChannelType::from_code(15).unwrap(), ChannelType::GuildForum);
        assert_eq!(
            ChannelType::resolve(&TypeTag::Kind(ChannelType::GuildVoice)).unwrap(),
            ChannelType::GuildVoice
        );
    }

    #[test]
    fn test_resolve_unknown() {
        assert!(matches!(
            ChannelType::from_name("Voicemail"),
            Err(Error::UnknownChannelType(_))
        ));
        assert!(matches!(ChannelType::from_code(7), Err(Error::UnknownChannelCode(7))));
    }

    #[test]
    fn test_serde_accepts_code_or_name() {
        let by_code: ChannelType = serde_json::from_str("4").unwrap();
        let by_name: ChannelType = serde_json::from_str("\"GuildCategory\"").unwrap();
        assert_eq!(by_code, ChannelType::GuildCategory);
        assert_eq!(by_name, ChannelType::GuildCategory);
        assert_eq!(serde_json::to_string(&ChannelType::GuildText).unwrap(), "0");
    }
}
