//! tableview: a headless list view engine for in-memory collections.
//!
//! Every list screen of a records application (customers, vehicles, repairs,
//! invoices) does the same thing: take the rows a repository returned, narrow them
//! with a search box and a few per-column filters, cap the result to the selected
//! page size, and show a "Showing 10 of 42 repairs." line. This crate packages that
//! behavior once, without any GUI toolkit:
//! - Global text search with a caller-defined predicate
//! - Any number of independent column filters, ANDed together
//! - "All" sentinels that switch a filter off instead of matching literally
//! - A page-size cap that truncates (it never pages)
//! - A summary line and post-refresh hook pushed to caller sinks
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← JSON file front end
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Engine (engine/)                                   │  ← refresh()
//! │  - Input ports (TextInput, Selector)                │
//! │  - Filter and search rules                          │
//! │  - Size cap, summary policy                         │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Matching      │   │ Config        │   │ Observability │
//! │ (matching/)   │   │ (lib.rs)      │   │ (observ...)   │
//! │ - Substring   │   │ - TOML        │   │ - tracing     │
//! │ - Fuzzy       │   │ - Key/value   │   │ - EnvFilter   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`engine`]: The view engine and its input ports
//! - [`matching`]: Predicate helpers for filters and search
//! - [`domain`]: Error types
//! - [`observability`]: Tracing subscriber setup
//!
//! # Configuration
//!
//! ```toml
//! entity_label = "repairs"
//! sentinels = ["all", "todos"]
//! page_sizes = [10, 25, 50]
//! default_page_size = 25
//! search_mode = "fuzzy"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tableview::engine::{StaticValue, ViewEngine};
//! use tableview::Config;
//!
//! let config = Config::default();
//! let mut engine = ViewEngine::builder(|_: Arc<[&str]>| {})
//!     .config(&config)
//!     .master(vec!["open", "closed", "open"])
//!     .build();
//! engine.add_column_filter(StaticValue::new("Open"), |status: &&str, value: &str| *status == value);
//!
//! assert_eq!(engine.refresh().summary(), "Showing 2 items.");
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod domain;
pub mod engine;
pub mod matching;
pub mod observability;

pub use domain::{Result, TableViewError};
pub use engine::{Selector, Sentinels, TextInput, ValueSource, ViewEngine, VisibleResult};
pub use matching::SearchMode;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Label of the page-size option that removes the cap.
pub const ALL_PAGE_SIZES_LABEL: &str = "All";

const KNOWN_KEYS: [&str; 6] = [
    "entity_label",
    "sentinels",
    "page_sizes",
    "default_page_size",
    "search_mode",
    "trace_level",
];

/// Engine configuration.
///
/// Every field has a default, so an empty TOML document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Plural noun used in the summary line. Default: `"items"`
    pub entity_label: String,

    /// Values that switch a column filter or the cap off.
    ///
    /// Compared case-insensitively. Default: `["all", "todos", "todas"]`
    pub sentinels: Vec<String>,

    /// Page sizes offered by the page-size selector, in display order.
    ///
    /// An "All" option is always appended. Default: `[10, 25, 50, 100]`
    pub page_sizes: Vec<usize>,

    /// Page size selected initially. `None` selects "All". Default: `None`
    pub default_page_size: Option<usize>,

    /// How the global search matches item fields. Default: `substring`
    pub search_mode: SearchMode,

    /// Tracing level filter, e.g. `info` or `tableview=debug`.
    ///
    /// `RUST_LOG` takes precedence when set. Default: `None` (`"info"`)
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entity_label: engine::DEFAULT_ENTITY_LABEL.to_string(),
            sentinels: vec!["all".to_string(), "todos".to_string(), "todas".to_string()],
            page_sizes: vec![10, 25, 50, 100],
            default_page_size: None,
            search_mode: SearchMode::Substring,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string map, falling back to defaults for
    /// missing or malformed values.
    ///
    /// Equivalent to `Config::default().with_overrides(map)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use tableview::{Config, SearchMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_sizes".to_string(), "5, 15,x".to_string());
    /// map.insert("search_mode".to_string(), "fuzzy".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.page_sizes, vec![5, 15]);
    /// assert_eq!(config.search_mode, SearchMode::Fuzzy);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().with_overrides(map)
    }

    /// Overlays `key=value` settings on this configuration.
    ///
    /// Missing keys and malformed values keep the current setting. The CLI
    /// feeds its repeated `--set` options through here.
    ///
    /// # Parsing Rules
    ///
    /// - `entity_label`: String (blank keeps the current value)
    /// - `sentinels`: Comma-separated string → `Vec<String>` (filters empty values)
    /// - `page_sizes`: Comma-separated integers; zero and unparsable entries dropped
    /// - `default_page_size`: Integer; `0` or `all` → `None`
    /// - `search_mode`: `substring` or `fuzzy`
    /// - `trace_level`: String → `Option<String>`
    #[must_use]
    pub fn with_overrides(self, map: &BTreeMap<String, String>) -> Self {
        for key in map.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                tracing::debug!(key = %key, "ignoring unknown setting");
            }
        }

        let entity_label = map
            .get("entity_label")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(self.entity_label);

        let sentinels = map
            .get("sentinels")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|v: &Vec<String>| !v.is_empty())
            .unwrap_or(self.sentinels);

        let page_sizes = map
            .get("page_sizes")
            .map(|s| {
                s.split(',')
                    .filter_map(|v| v.trim().parse::<usize>().ok())
                    .filter(|&n| n > 0)
                    .collect::<Vec<_>>()
            })
            .filter(|v: &Vec<usize>| !v.is_empty())
            .unwrap_or(self.page_sizes);

        let default_page_size = match map.get("default_page_size").map(|s| s.trim()) {
            Some(v) if v.eq_ignore_ascii_case(ALL_PAGE_SIZES_LABEL) => None,
            Some(v) => match v.parse::<usize>() {
                Ok(0) => None,
                Ok(n) => Some(n),
                Err(_) => self.default_page_size,
            },
            None => self.default_page_size,
        };

        let search_mode = match map.get("search_mode").map(|s| s.parse::<SearchMode>()) {
            Some(Ok(mode)) => mode,
            Some(Err(e)) => {
                tracing::debug!(error = %e, "invalid search_mode, keeping current");
                self.search_mode
            }
            None => self.search_mode,
        };

        Self {
            entity_label,
            sentinels,
            page_sizes,
            default_page_size,
            search_mode,
            trace_level: map.get("trace_level").cloned().or(self.trace_level),
        }
    }

    /// Parses a TOML document and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`TableViewError::ConfigParse`] for malformed TOML or unknown keys,
    /// and [`TableViewError::Config`] when validation fails.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`TableViewError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Config::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading configuration");
        Self::from_toml_str(&text)
    }

    /// Checks the invariants TOML deserialization cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`TableViewError::Config`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.entity_label.trim().is_empty() {
            return Err(TableViewError::Config("entity_label must not be blank".to_string()));
        }
        if self.page_sizes.contains(&0) {
            return Err(TableViewError::Config(
                "page_sizes must be positive; use \"All\" for no cap".to_string(),
            ));
        }
        if let Some(size) = self.default_page_size {
            if !self.page_sizes.contains(&size) {
                return Err(TableViewError::Config(format!(
                    "default_page_size {size} is not one of page_sizes {:?}",
                    self.page_sizes
                )));
            }
        }
        Ok(())
    }

    /// The configured sentinel set.
    #[must_use]
    pub fn sentinels(&self) -> Sentinels {
        Sentinels::new(&self.sentinels)
    }

    /// Builds the page-size selector: configured sizes followed by "All", with
    /// `default_page_size` selected (or "All" when unset).
    ///
    /// ```rust
    /// use tableview::{Config, ValueSource};
    ///
    /// let config = Config { default_page_size: Some(25), ..Config::default() };
    /// let selector = config.page_size_selector();
    /// assert_eq!(selector.current_value().as_deref(), Some("25"));
    /// ```
    #[must_use]
    pub fn page_size_selector(&self) -> Selector {
        let selector = Selector::page_sizes(&self.page_sizes, ALL_PAGE_SIZES_LABEL);
        let initial = self
            .default_page_size
            .map_or_else(|| ALL_PAGE_SIZES_LABEL.to_string(), |n| n.to_string());
        if !selector.select(&initial) {
            selector.select(ALL_PAGE_SIZES_LABEL);
        }
        selector
    }
}

/// Validates the configuration and starts tracing from it.
///
/// Call once at startup, before building engines. Re-initialization keeps the
/// first subscriber.
///
/// # Errors
///
/// Returns [`TableViewError::Config`] when `config` fails [`Config::validate`];
/// tracing is left uninitialized in that case.
pub fn initialize(config: &Config) -> Result<()> {
    config.validate()?;
    observability::init_tracing(config);
    tracing::debug!(
        entity_label = %config.entity_label,
        search_mode = ?config.search_mode,
        "initializing tableview"
    );
    Ok(())
}
