//! Filter rules and input value normalization.
//!
//! A rule pairs a [`ValueSource`] with a caller-supplied predicate. At refresh time
//! the engine reads the source, normalizes the value, and decides whether the rule
//! is active. Inactive rules pass every item; active rules keep only the items their
//! predicate accepts.
//!
//! # Normalization
//!
//! Input values are trimmed and lower-cased before reaching a predicate. The engine
//! cannot see item fields, so predicates fold the case of the fields they compare.
//!
//! # Inert Values
//!
//! - Column filters are inert when the value is missing, blank, or a sentinel
//!   (see [`Sentinels`]).
//! - The global search is inert only when blank. Typing "all" into a search box
//!   searches for "all".

use super::source::ValueSource;
use std::fmt;

/// Predicate over an item and a normalized input value.
pub type Predicate<T> = Box<dyn Fn(&T, &str) -> bool>;

/// Sentinel values that switch a column filter off.
///
/// Comparison is case-insensitive and ignores surrounding whitespace. The default
/// set covers the English and Spanish "all" options used by enumerated selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentinels {
    values: Vec<String>,
}

impl Sentinels {
    /// Builds a sentinel set from arbitrary values. Blank values are ignored.
    #[must_use]
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut folded: Vec<String> = Vec::new();
        for value in values {
            if let Some(v) = normalize(value.as_ref()) {
                if !folded.contains(&v) {
                    folded.push(v);
                }
            }
        }
        Self { values: folded }
    }

    /// Returns `true` when `value` is one of the sentinels.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        normalize(value).is_some_and(|v| self.values.contains(&v))
    }

    /// Returns the folded sentinel values.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl Default for Sentinels {
    fn default() -> Self {
        Self::new(["all", "todos", "todas"])
    }
}

/// Trims and lower-cases an input value. Blank values yield `None`.
///
/// ```rust
/// use tableview::engine::normalize;
///
/// assert_eq!(normalize("  Open "), Some("open".to_string()));
/// assert_eq!(normalize("   "), None);
/// ```
#[must_use]
pub fn normalize(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// An independent column filter.
pub struct FilterRule<T> {
    source: Box<dyn ValueSource>,
    predicate: Predicate<T>,
}

impl<T> FilterRule<T> {
    /// Creates a rule from an input source and a predicate.
    pub fn new<S, P>(source: S, predicate: P) -> Self
    where
        S: ValueSource + 'static,
        P: Fn(&T, &str) -> bool + 'static,
    {
        Self {
            source: Box::new(source),
            predicate: Box::new(predicate),
        }
    }

    /// Returns the normalized value if the rule is active.
    ///
    /// `None` means the rule is inert for this refresh.
    #[must_use]
    pub fn active_value(&self, sentinels: &Sentinels) -> Option<String> {
        self.source
            .current_value()
            .and_then(|raw| normalize(&raw))
            .filter(|value| !sentinels.contains(value))
    }

    /// Evaluates the predicate against an already-normalized value.
    #[must_use]
    pub fn matches(&self, item: &T, value: &str) -> bool {
        (self.predicate)(item, value)
    }
}

impl<T> fmt::Debug for FilterRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRule")
            .field("value", &self.source.current_value())
            .finish_non_exhaustive()
    }
}

/// The global search rule, applied before any column filter.
pub struct SearchRule<T> {
    source: Box<dyn ValueSource>,
    predicate: Predicate<T>,
}

impl<T> SearchRule<T> {
    /// Creates a search rule from a text source and a predicate.
    pub fn new<S, P>(source: S, predicate: P) -> Self
    where
        S: ValueSource + 'static,
        P: Fn(&T, &str) -> bool + 'static,
    {
        Self {
            source: Box::new(source),
            predicate: Box::new(predicate),
        }
    }

    /// Returns the normalized search term, or `None` when the input is blank.
    #[must_use]
    pub fn active_value(&self) -> Option<String> {
        self.source.current_value().and_then(|raw| normalize(&raw))
    }

    #[must_use]
    pub fn matches(&self, item: &T, term: &str) -> bool {
        (self.predicate)(item, term)
    }
}

impl<T> fmt::Debug for SearchRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchRule")
            .field("value", &self.source.current_value())
            .finish_non_exhaustive()
    }
}
