//! Ready-made predicates for column filters and the global search.
//!
//! The engine hands predicates an input value that is already trimmed and
//! lower-cased. Item fields are the predicate's business, so every helper here
//! folds the field side before comparing.
//!
//! # Search Modes
//!
//! - [`SearchMode::Substring`]: the whole term must appear in at least one field
//! - [`SearchMode::Fuzzy`]: the term is split on whitespace and every token must
//!   fuzzy-match at least one field (skim algorithm)
//!
//! # Example
//!
//! ```rust
//! use tableview::matching::{search_predicate, SearchMode};
//!
//! struct Customer { name: String, phone: String }
//!
//! let predicate = search_predicate(SearchMode::Fuzzy, |c: &Customer| {
//!     vec![c.name.clone(), c.phone.clone()]
//! });
//!
//! let ana = Customer { name: "Ana Torres".into(), phone: "555-0101".into() };
//! assert!(predicate(&ana, "atrs 0101"));
//! assert!(!predicate(&ana, "zz"));
//! ```

use crate::engine::Predicate;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Deserialize;
use std::str::FromStr;

/// How the global search compares its term with item fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Substring,
    Fuzzy,
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substring" | "contains" => Ok(Self::Substring),
            "fuzzy" => Ok(Self::Fuzzy),
            other => Err(format!("unknown search mode `{other}`")),
        }
    }
}

/// Returns `true` when `field` contains the already-folded `needle`.
#[must_use]
pub fn contains_folded(field: &str, needle: &str) -> bool {
    field.to_lowercase().contains(needle)
}

/// Returns `true` when `field` equals the already-folded `value`, ignoring case
/// and surrounding whitespace.
#[must_use]
pub fn equals_folded(field: &str, value: &str) -> bool {
    field.trim().to_lowercase() == value
}

/// Returns `true` when any field contains the already-folded `needle`.
pub fn any_field_contains<I, S>(fields: I, needle: &str) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .any(|field| contains_folded(field.as_ref(), needle))
}

/// Multi-token fuzzy matcher.
///
/// Wraps a single [`SkimMatcherV2`] so predicates built from it do not rebuild
/// the matcher per item.
#[derive(Default)]
pub struct FuzzySearch {
    matcher: SkimMatcherV2,
}

impl FuzzySearch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when every whitespace-separated token of `query` matches
    /// at least one field. An empty query matches everything.
    pub fn matches<I, S>(&self, fields: I, query: &str) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields: Vec<String> = fields
            .into_iter()
            .map(|f| f.as_ref().to_lowercase())
            .collect();

        query.split_whitespace().all(|token| {
            let token = token.to_lowercase();
            fields
                .iter()
                .any(|field| self.matcher.fuzzy_match(field, &token).is_some())
        })
    }
}

impl std::fmt::Debug for FuzzySearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FuzzySearch")
    }
}

/// Builds a global search predicate over the fields `fields` extracts.
pub fn search_predicate<T, F>(mode: SearchMode, fields: F) -> Predicate<T>
where
    T: 'static,
    F: Fn(&T) -> Vec<String> + 'static,
{
    match mode {
        SearchMode::Substring => {
            Box::new(move |item: &T, term: &str| any_field_contains(fields(item), term))
        }
        SearchMode::Fuzzy => {
            let fuzzy = FuzzySearch::new();
            Box::new(move |item: &T, term: &str| fuzzy.matches(fields(item), term))
        }
    }
}
