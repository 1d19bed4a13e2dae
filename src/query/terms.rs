//! Query shapes accepted by the query layer.
//!
//! Every shape the search dispatcher understands is spelled out as a type
//! here, so classification is a `match` instead of runtime type checks.

use std::fmt;

use regex::Regex;

use crate::models::{ChannelType, TypeTag};
use crate::utils::compare_strings;

/// A name or topic to match: a literal string or a pattern.
#[derive(Clone)]
pub enum TextMatch {
    Literal(String),
    Pattern(Regex),
}

impl TextMatch {
    /// Case-insensitive literal equality, or a pattern search.
    pub fn matches_folded(&self, candidate: &str) -> bool {
        match self {
            Self::Literal(literal) => compare_strings(literal, candidate),
            Self::Pattern(pattern) => pattern.is_match(candidate),
        }
    }

    /// Exact literal equality, or a pattern search.
    pub fn matches_exact(&self, candidate: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == candidate,
            Self::Pattern(pattern) => pattern.is_match(candidate),
        }
    }
}

impl fmt::Debug for TextMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "Literal({:?})", literal),
            Self::Pattern(pattern) => write!(f, "Pattern(/{}/)", pattern.as_str()),
        }
    }
}

impl From<&str> for TextMatch {
    fn from(literal: &str) -> Self {
        Self::Literal(literal.to_string())
    }
}

impl From<String> for TextMatch {
    fn from(literal: String) -> Self {
        Self::Literal(literal)
    }
}

impl From<Regex> for TextMatch {
    fn from(pattern: Regex) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<&Regex> for TextMatch {
    fn from(pattern: &Regex) -> Self {
        Self::Pattern(pattern.clone())
    }
}

/// Search by optional id and optional name.
///
/// A present id that resolves wins; the name is only consulted when the id
/// is absent or resolves to nothing.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    pub id: Option<String>,
    pub name: Option<TextMatch>,
}

impl Criteria {
    /// Empty criteria. Matches nothing until an id or name is set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the id (builder pattern).
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the name to match (builder pattern).
    #[must_use]
    pub fn name(mut self, name: impl Into<TextMatch>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// One search input, as accepted by `search_by`.
#[derive(Debug, Clone)]
pub enum SearchTerm {
    /// Id or name, possibly in mention form.
    Text(String),
    /// Pattern tested against names.
    Pattern(Regex),
    Criteria(Criteria),
}

impl From<&str> for SearchTerm {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for SearchTerm {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Regex> for SearchTerm {
    fn from(pattern: Regex) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<&Regex> for SearchTerm {
    fn from(pattern: &Regex) -> Self {
        Self::Pattern(pattern.clone())
    }
}

impl From<Criteria> for SearchTerm {
    fn from(criteria: Criteria) -> Self {
        Self::Criteria(criteria)
    }
}

/// A full search request: a single term, or a batch of terms.
///
/// Batches hold plain terms, so a batch cannot contain another batch.
#[derive(Debug, Clone)]
pub enum Query {
    One(SearchTerm),
    Many(Vec<SearchTerm>),
}

impl From<SearchTerm> for Query {
    fn from(term: SearchTerm) -> Self {
        Self::One(term)
    }
}

impl From<&str> for Query {
    fn from(text: &str) -> Self {
        Self::One(text.into())
    }
}

impl From<String> for Query {
    fn from(text: String) -> Self {
        Self::One(text.into())
    }
}

impl From<Regex> for Query {
    fn from(pattern: Regex) -> Self {
        Self::One(pattern.into())
    }
}

impl From<Criteria> for Query {
    fn from(criteria: Criteria) -> Self {
        Self::One(criteria.into())
    }
}

impl From<Vec<SearchTerm>> for Query {
    fn from(terms: Vec<SearchTerm>) -> Self {
        Self::Many(terms)
    }
}

impl From<Vec<&str>> for Query {
    fn from(texts: Vec<&str>) -> Self {
        Self::Many(texts.into_iter().map(SearchTerm::from).collect())
    }
}

/// One or more channel types to select.
#[derive(Debug, Clone, Default)]
pub struct TypeSelector(pub Vec<TypeTag>);

impl TypeSelector {
    pub fn tags(&self) -> &[TypeTag] {
        &self.0
    }
}

impl From<TypeTag> for TypeSelector {
    fn from(tag: TypeTag) -> Self {
        Self(vec![tag])
    }
}

impl From<ChannelType> for TypeSelector {
    fn from(kind: ChannelType) -> Self {
        Self(vec![kind.into()])
    }
}

impl From<&str> for TypeSelector {
    fn from(name: &str) -> Self {
        Self(vec![name.into()])
    }
}

impl From<i64> for TypeSelector {
    fn from(code: i64) -> Self {
        Self(vec![code.into()])
    }
}

impl From<Vec<TypeTag>> for TypeSelector {
    fn from(tags: Vec<TypeTag>) -> Self {
        Self(tags)
    }
}

impl From<Vec<ChannelType>> for TypeSelector {
    fn from(kinds: Vec<ChannelType>) -> Self {
        Self(kinds.into_iter().map(TypeTag::from).collect())
    }
}

impl<const N: usize> From<[ChannelType; N]> for TypeSelector {
    fn from(kinds: [ChannelType; N]) -> Self {
        Self(kinds.into_iter().map(TypeTag::from).collect())
    }
}

impl From<Vec<&str>> for TypeSelector {
    fn from(names: Vec<&str>) -> Self {
        Self(names.into_iter().map(TypeTag::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_matching_modes() {
        let literal = TextMatch::from("General");
        assert!(literal.matches_folded("general"));
        assert!(!literal.matches_exact("general"));
        assert!(literal.matches_exact("General"));
    }

    #[test]
    fn test_pattern_is_unanchored() {
        let pattern = TextMatch::from(Regex::new("eral").unwrap());
        assert!(pattern.matches_folded("general"));
        assert!(pattern.matches_exact("general"));
        assert!(!pattern.matches_exact("random"));
    }

    #[test]
    fn test_query_classification() {
        assert!(matches!(Query::from("x"), Query::One(SearchTerm::Text(_))));
        assert!(matches!(Query::from(Criteria::new().id("1")), Query::One(SearchTerm::Criteria(_))));
        assert!(matches!(Query::from(vec!["a", "b"]), Query::Many(terms) if terms.len() == 2));
    }
}
