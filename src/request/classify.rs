//! Classification of untrusted JSON values into query shapes.
//!
//! Anything that doesn't fit a shape classifies to `None`, which the
//! handler turns into "no match".

use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};
use tracing::{trace, warn};

use crate::error::{Error, Result};
use crate::models::TypeTag;
use crate::query::{Criteria, Query, SearchTerm, TextMatch, TypeSelector};

const PATTERN_CACHE_MAX: usize = 1024;

/// Compiled request patterns, keyed by flags and source.
static PATTERN_CACHE: Lazy<RwLock<HashMap<(String, String), Regex>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Compile a pattern with optional single-letter flags (`i`, `m`, `s`, `x`).
///
/// Compiled patterns are reused across requests. Other flag letters are
/// ignored.
pub fn compile_pattern(source: &str, flags: &str) -> Result<Regex> {
    let key = (flags.to_string(), source.to_string());
    if let Some(pattern) = PATTERN_CACHE.read().get(&key) {
        return Ok(pattern.clone());
    }

    let mut builder = RegexBuilder::new(source);
    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            other => {
                trace!("Ignoring pattern flag {:?}", other);
                continue;
            }
        };
    }
    let compiled = builder.build().map_err(|source_err| Error::InvalidPattern {
        source_text: source.to_string(),
        source: source_err,
    })?;

    let mut cache = PATTERN_CACHE.write();
    if cache.len() >= PATTERN_CACHE_MAX {
        cache.clear();
    }
    cache.entry(key).or_insert_with(|| compiled.clone());
    Ok(compiled)
}

/// A string key. Any other JSON value is not a key.
pub fn key(value: &Value) -> Option<&str> {
    value.as_str()
}

/// `{"pattern": "...", "flags": "..."}` → compiled pattern.
fn pattern(object: &Map<String, Value>) -> Option<Regex> {
    let source = object.get("pattern")?.as_str()?;
    let flags = object.get("flags").and_then(Value::as_str).unwrap_or("");
    match compile_pattern(source, flags) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            warn!("Treating request pattern as no match: {}", e);
            None
        }
    }
}

/// A literal string, or a pattern object.
pub fn text_match(value: &Value) -> Option<TextMatch> {
    match value {
        Value::String(literal) => Some(TextMatch::Literal(literal.clone())),
        Value::Object(object) => pattern(object).map(TextMatch::Pattern),
        _ => None,
    }
}

/// A single search term: text, pattern object or criteria object.
///
/// In criteria, a non-string id is dropped and an unusable name is dropped;
/// criteria left with neither match nothing.
pub fn search_term(value: &Value) -> Option<SearchTerm> {
    match value {
        Value::String(text) => Some(SearchTerm::Text(text.clone())),
        Value::Object(object) if object.contains_key("pattern") => {
            pattern(object).map(SearchTerm::Pattern)
        }
        Value::Object(object) => Some(SearchTerm::Criteria(Criteria {
            id: object.get("id").and_then(key).map(str::to_string),
            name: object.get("name").and_then(text_match),
        })),
        _ => None,
    }
}

/// A single term or a batch. Batch elements that are not terms (including
/// nested arrays) are skipped.
pub fn query(value: &Value) -> Option<Query> {
    match value {
        Value::Array(items) => Some(Query::Many(items.iter().filter_map(search_term).collect())),
        other => search_term(other).map(Query::One),
    }
}

fn type_tag(value: &Value) -> Option<TypeTag> {
    match value {
        Value::String(name) => Some(TypeTag::Name(name.clone())),
        Value::Number(code) => code.as_i64().map(TypeTag::Code),
        _ => None,
    }
}

/// One type tag or an array of them. Values that can't be tags are dropped.
pub fn type_selector(value: &Value) -> TypeSelector {
    match value {
        Value::Array(items) => TypeSelector(items.iter().filter_map(type_tag).collect()),
        other => TypeSelector(type_tag(other).into_iter().collect()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_search_term_shapes() {
        assert!(matches!(search_term(&json!("general")), Some(SearchTerm::Text(_))));
        assert!(matches!(search_term(&json!({"pattern": "^gen"})), Some(SearchTerm::Pattern(_))));
        assert!(search_term(&json!({"pattern": "("})).is_none());
        assert!(search_term(&json!(42)).is_none());
        assert!(search_term(&json!(null)).is_none());
    }

    #[test]
    fn test_criteria_drops_bad_fields() {
        let Some(SearchTerm::Criteria(criteria)) = search_term(&json!({"id": 42, "name": "x"})) else {
            panic!("expected criteria");
        };
        assert!(criteria.id.is_none());
        assert!(matches!(criteria.name, Some(TextMatch::Literal(_))));

        let Some(SearchTerm::Criteria(criteria)) =
            search_term(&json!({"id": "1", "name": {"pattern": "x", "flags": "i"}}))
        else {
            panic!("expected criteria");
        };
        assert_eq!(criteria.id.as_deref(), Some("1"));
        assert!(matches!(criteria.name, Some(TextMatch::Pattern(p)) if p.is_match("X")));
    }

    #[test]
    fn test_nested_arrays_are_skipped() {
        let Some(Query::Many(terms)) = query(&json!(["a", ["b"], 3, {"id": "c"}])) else {
            panic!("expected batch");
        };
        assert_eq!(terms.len(), 2);
    }

    #[test]
    fn test_type_selector() {
        assert_eq!(type_selector(&json!("GuildText")).tags(), [TypeTag::Name("GuildText".into())]);
        assert_eq!(
            type_selector(&json!([0, "voice", null, 1.5])).tags(),
            [TypeTag::Code(0), TypeTag::Name("voice".into())]
        );
        assert!(type_selector(&json!(true)).tags().is_empty());
    }

    #[test]
    fn test_compile_pattern_reuses_and_reports() {
        let first = compile_pattern("^a+$", "").unwrap();
        let second = compile_pattern("^a+$", "").unwrap();
        assert_eq!(first.as_str(), second.as_str());
        assert!(matches!(compile_pattern("[", ""), Err(Error::InvalidPattern { .. })));
    }
}
