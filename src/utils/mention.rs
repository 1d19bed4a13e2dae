//! Mention stripping.
//!
//! Users paste channels, roles, users and emojis in their mention form
//! (`<#123>`, `<@!123>`, `<:blob:123>`). Queries want the raw id.

use once_cell::sync::Lazy;
use regex::Regex;

/// `<:name:id>` and `<a:name:id>`.
static EMOJI_MENTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<a?:[^:<>\s]+:([^:<>\s]+)>$").expect("emoji mention regex is valid")
});

/// `<#id>`, `<@id>`, `<@!id>` and `<@&id>`.
static ID_MENTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<(?:#|@[!&]?)([^<>\s]+)>$").expect("id mention regex is valid")
});

/// Strip mention decoration around a raw id.
///
/// Surrounding whitespace is trimmed. Input that is not a mention comes back
/// trimmed but otherwise unchanged, and stripping twice is the same as
/// stripping once.
pub fn strip_mention(raw: &str) -> String {
    let trimmed = raw.trim();

    let captures = EMOJI_MENTION
        .captures(trimmed)
        .or_else(|| ID_MENTION.captures(trimmed));

    match captures.and_then(|c| c.get(1)) {
        Some(id) => id.as_str().to_string(),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_id_mentions() {
        assert_eq!(strip_mention("<#123>"), "123");
        assert_eq!(strip_mention("<@123>"), "123");
        assert_eq!(strip_mention("<@!123>"), "123");
        assert_eq!(strip_mention("<@&123>"), "123");
        assert_eq!(strip_mention("  <#c2> "), "c2");
    }

    #[test]
    fn test_strip_emoji_mentions() {
        assert_eq!(strip_mention("<:blob:42>"), "42");
        assert_eq!(strip_mention("<a:party_blob:42>"), "42");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(strip_mention("general"), "general");
        assert_eq!(strip_mention("<#>"), "<#>");
        assert_eq!(strip_mention("<#a b>"), "<#a b>");
        assert_eq!(strip_mention("#general"), "#general");
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "<#123>",
            "<@!<#1>>",
            "<a:x:y>",
            " spaced ",
            "<<#1>>",
            "<:a:b:c>",
            "",
            "<#<#1>>",
        ] {
            let once = strip_mention(raw);
            assert_eq!(strip_mention(&once), once, "not idempotent for {raw:?}");
        }
    }
}
