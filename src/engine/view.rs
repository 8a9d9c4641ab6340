//! The view engine: master collection in, capped filtered view out.
//!
//! [`ViewEngine`] holds a master snapshot, an optional global search, any number
//! of column filters and an optional page-size source. Every call to
//! [`ViewEngine::refresh`] rebuilds the [`VisibleResult`] from scratch and pushes
//! it to the caller's sinks.
//!
//! # Refresh Algorithm
//!
//! 1. Take the current master snapshot
//! 2. Keep items matching the global search (if its input is non-blank)
//! 3. Keep items matching every active column filter, in registration order
//! 4. Count the filtered items (`total_count`)
//! 5. Truncate to the page-size cap, preserving order (`visible_count`)
//! 6. Push the new collection, then the summary, then run the post-refresh hook
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::sync::Arc;
//! use tableview::engine::{Selector, TextInput, ViewEngine};
//!
//! #[derive(Debug, Clone)]
//! struct Repair {
//!     customer: &'static str,
//!     status: &'static str,
//! }
//!
//! let shown = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&shown);
//!
//! let search = TextInput::new();
//! let status = Selector::new(["All", "open", "closed"]);
//!
//! let mut engine = ViewEngine::builder(move |items: Arc<[Repair]>| {
//!     *sink.borrow_mut() = items.to_vec();
//! })
//! .master(vec![
//!     Repair { customer: "Bob", status: "open" },
//!     Repair { customer: "Ann", status: "closed" },
//!     Repair { customer: "Bea", status: "open" },
//! ])
//! .global_search(search.clone(), |r: &Repair, term: &str| {
//!     r.customer.to_lowercase().contains(term)
//! })
//! .entity_label("repairs")
//! .build();
//!
//! engine.add_column_filter(status.clone(), |r: &Repair, value: &str| r.status == value);
//!
//! status.select("open");
//! search.set("b");
//! let result = engine.refresh();
//!
//! assert_eq!(result.summary(), "Showing 2 repairs.");
//! assert_eq!(shown.borrow().len(), 2);
//! ```

use super::cap::SizeCap;
use super::filter::{FilterRule, SearchRule, Sentinels};
use super::source::ValueSource;
use super::summary::summarize;
use std::fmt;
use std::sync::Arc;

type VisibleSink<T> = Box<dyn FnMut(Arc<[T]>)>;
type SummarySink = Box<dyn FnMut(&str)>;
type RefreshHook<T> = Box<dyn FnMut(&VisibleResult<T>)>;

fn snapshot<T>(master: Option<Vec<T>>) -> Arc<[T]> {
    master.unwrap_or_default().into()
}

/// Output of one refresh.
///
/// Immutable. The item collection is shared with whatever the visible sink
/// retained; neither side can mutate it.
pub struct VisibleResult<T> {
    items: Arc<[T]>,
    visible_count: usize,
    total_count: usize,
    summary: String,
}

impl<T> VisibleResult<T> {
    fn empty(label: Option<&str>) -> Self {
        Self {
            items: snapshot(None),
            visible_count: 0,
            total_count: 0,
            summary: summarize(0, 0, label),
        }
    }

    /// The filtered, capped items in master order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// A shared handle to the visible items.
    #[must_use]
    pub fn shared_items(&self) -> Arc<[T]> {
        Arc::clone(&self.items)
    }

    /// Number of visible items after the cap.
    #[must_use]
    pub const fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Number of items that passed every filter, before the cap.
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.total_count
    }

    /// Human-readable count summary.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns `true` when the cap hid part of the filtered result.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.visible_count < self.total_count
    }
}

impl<T> Clone for VisibleResult<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            visible_count: self.visible_count,
            total_count: self.total_count,
            summary: self.summary.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for VisibleResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibleResult")
            .field("items", &self.items)
            .field("visible_count", &self.visible_count)
            .field("total_count", &self.total_count)
            .field("summary", &self.summary)
            .finish()
    }
}

/// Builder for [`ViewEngine`].
///
/// Only the visible-collection sink is required; it is passed to
/// [`ViewEngine::builder`]. Everything else is optional.
pub struct ViewEngineBuilder<T> {
    master: Option<Vec<T>>,
    search: Option<SearchRule<T>>,
    page_size: Option<Box<dyn ValueSource>>,
    visible_sink: VisibleSink<T>,
    summary_sink: Option<SummarySink>,
    on_refresh: Option<RefreshHook<T>>,
    entity_label: Option<String>,
    sentinels: Sentinels,
}

impl<T: Clone> ViewEngineBuilder<T> {
    /// Sets the initial master collection. `None` is an empty collection.
    #[must_use]
    pub fn master(mut self, master: impl Into<Option<Vec<T>>>) -> Self {
        self.master = master.into();
        self
    }

    /// Binds the global search to a text source and a predicate.
    ///
    /// The predicate receives the trimmed, lower-cased search term.
    #[must_use]
    pub fn global_search<S, P>(mut self, source: S, predicate: P) -> Self
    where
        S: ValueSource + 'static,
        P: Fn(&T, &str) -> bool + 'static,
    {
        self.search = Some(SearchRule::new(source, predicate));
        self
    }

    /// Binds the page-size selector.
    #[must_use]
    pub fn page_size<S>(mut self, source: S) -> Self
    where
        S: ValueSource + 'static,
    {
        self.page_size = Some(Box::new(source));
        self
    }

    /// Sets the sink that receives the summary line after each refresh.
    #[must_use]
    pub fn summary_sink<F>(mut self, sink: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.summary_sink = Some(Box::new(sink));
        self
    }

    /// Sets a hook that runs after every output of a refresh has been pushed.
    #[must_use]
    pub fn on_refresh<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&VisibleResult<T>) + 'static,
    {
        self.on_refresh = Some(Box::new(hook));
        self
    }

    /// Sets the plural noun used in the summary ("repairs", "customers").
    #[must_use]
    pub fn entity_label(mut self, label: impl Into<String>) -> Self {
        self.entity_label = Some(label.into());
        self
    }

    /// Replaces the sentinel set that switches column filters and the cap off.
    #[must_use]
    pub fn sentinels(mut self, sentinels: Sentinels) -> Self {
        self.sentinels = sentinels;
        self
    }

    /// Applies the label, sentinels and page-size selector from configuration.
    ///
    /// The selector starts on `default_page_size`. A later call to
    /// [`page_size`](Self::page_size) replaces it.
    #[must_use]
    pub fn config(self, config: &crate::Config) -> Self {
        self.entity_label(config.entity_label.clone())
            .sentinels(config.sentinels())
            .page_size(config.page_size_selector())
    }

    /// Finishes construction. The engine starts with an empty result; call
    /// [`ViewEngine::refresh`] to compute the first view.
    #[must_use]
    pub fn build(self) -> ViewEngine<T> {
        let last = VisibleResult::empty(self.entity_label.as_deref());
        ViewEngine {
            master: snapshot(self.master),
            search: self.search,
            filters: Vec::new(),
            page_size: self.page_size,
            visible_sink: self.visible_sink,
            summary_sink: self.summary_sink,
            on_refresh: self.on_refresh,
            entity_label: self.entity_label,
            sentinels: self.sentinels,
            last,
        }
    }
}

/// Filtering, search and capping engine behind one list view.
///
/// Constructed once per view. Inputs are read at refresh time through
/// [`ValueSource`]s, so the controller only has to call [`refresh`](Self::refresh)
/// whenever something changed.
pub struct ViewEngine<T> {
    master: Arc<[T]>,
    search: Option<SearchRule<T>>,
    filters: Vec<FilterRule<T>>,
    page_size: Option<Box<dyn ValueSource>>,
    visible_sink: VisibleSink<T>,
    summary_sink: Option<SummarySink>,
    on_refresh: Option<RefreshHook<T>>,
    entity_label: Option<String>,
    sentinels: Sentinels,
    last: VisibleResult<T>,
}

impl<T: Clone> ViewEngine<T> {
    /// Starts building an engine that pushes each visible collection to `sink`.
    pub fn builder<F>(sink: F) -> ViewEngineBuilder<T>
    where
        F: FnMut(Arc<[T]>) + 'static,
    {
        ViewEngineBuilder {
            master: None,
            search: None,
            page_size: None,
            visible_sink: Box::new(sink),
            summary_sink: None,
            on_refresh: None,
            entity_label: None,
            sentinels: Sentinels::default(),
        }
    }

    /// Starts building an engine preconfigured from `config`.
    ///
    /// Shorthand for `ViewEngine::builder(sink).config(config)`.
    pub fn from_config<F>(config: &crate::Config, sink: F) -> ViewEngineBuilder<T>
    where
        F: FnMut(Arc<[T]>) + 'static,
    {
        Self::builder(sink).config(config)
    }

    /// Registers a column filter.
    ///
    /// Both parts are required. If either is missing the registration is dropped
    /// without error. Filters cannot be removed; they live as long as the engine.
    pub fn register_column_filter<S, P>(&mut self, source: Option<S>, predicate: Option<P>)
    where
        S: ValueSource + 'static,
        P: Fn(&T, &str) -> bool + 'static,
    {
        match (source, predicate) {
            (Some(source), Some(predicate)) => {
                self.filters.push(FilterRule::new(source, predicate));
                tracing::debug!(filters = self.filters.len(), "column filter registered");
            }
            (source, predicate) => {
                tracing::debug!(
                    has_source = source.is_some(),
                    has_predicate = predicate.is_some(),
                    "incomplete column filter dropped"
                );
            }
        }
    }

    /// Registers a column filter whose parts are known to be present.
    pub fn add_column_filter<S, P>(&mut self, source: S, predicate: P)
    where
        S: ValueSource + 'static,
        P: Fn(&T, &str) -> bool + 'static,
    {
        self.register_column_filter(Some(source), Some(predicate));
    }

    /// Replaces the master collection. `None` is treated as empty.
    ///
    /// The visible result is stale until the next [`refresh`](Self::refresh).
    pub fn set_master(&mut self, master: impl Into<Option<Vec<T>>>) {
        self.master = snapshot(master.into());
        tracing::debug!(master_len = self.master.len(), "master collection replaced");
    }

    /// Recomputes the visible result and pushes it to every sink.
    pub fn refresh(&mut self) -> &VisibleResult<T> {
        let master = Arc::clone(&self.master);
        let _span = tracing::debug_span!(
            "refresh",
            master_len = master.len(),
            filters = self.filters.len()
        )
        .entered();

        let mut filtered: Vec<&T> = master.iter().collect();

        if let Some(search) = &self.search {
            if let Some(term) = search.active_value() {
                filtered.retain(|item| search.matches(item, &term));
                tracing::trace!(term = %term, remaining = filtered.len(), "global search applied");
            }
        }

        for rule in &self.filters {
            if let Some(value) = rule.active_value(&self.sentinels) {
                filtered.retain(|item| rule.matches(item, &value));
                tracing::trace!(value = %value, remaining = filtered.len(), "column filter applied");
            }
        }

        let total_count = filtered.len();
        let visible_count = self.current_cap().resolve(total_count);
        filtered.truncate(visible_count);

        let items: Arc<[T]> = filtered.into_iter().cloned().collect();
        let summary = summarize(visible_count, total_count, self.entity_label.as_deref());

        self.last = VisibleResult {
            items,
            visible_count,
            total_count,
            summary,
        };

        (self.visible_sink)(self.last.shared_items());
        if let Some(sink) = self.summary_sink.as_mut() {
            sink(self.last.summary());
        }
        if let Some(hook) = self.on_refresh.as_mut() {
            hook(&self.last);
        }

        tracing::debug!(visible_count, total_count, "view refreshed");
        &self.last
    }
}

impl<T> ViewEngine<T> {
    /// Cap selected by the page-size source right now.
    #[must_use]
    pub fn current_cap(&self) -> SizeCap {
        self.page_size.as_ref().map_or(SizeCap::Unlimited, |source| {
            SizeCap::parse(source.current_value().as_deref(), &self.sentinels)
        })
    }

    /// Visible count from the most recent refresh.
    #[must_use]
    pub const fn last_visible_count(&self) -> usize {
        self.last.visible_count
    }

    /// Filtered count before the cap, from the most recent refresh.
    #[must_use]
    pub const fn last_total_count(&self) -> usize {
        self.last.total_count
    }

    #[must_use]
    pub const fn last_result(&self) -> &VisibleResult<T> {
        &self.last
    }

    /// The current master snapshot.
    #[must_use]
    pub fn master(&self) -> &[T] {
        &self.master
    }

    /// Number of registered column filters.
    #[must_use]
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    #[must_use]
    pub const fn has_global_search(&self) -> bool {
        self.search.is_some()
    }
}

impl<T> fmt::Debug for ViewEngine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewEngine")
            .field("master_len", &self.master.len())
            .field("search", &self.search)
            .field("filters", &self.filters)
            .field("entity_label", &self.entity_label)
            .field("last_visible_count", &self.last.visible_count)
            .field("last_total_count", &self.last.total_count)
            .finish_non_exhaustive()
    }
}
