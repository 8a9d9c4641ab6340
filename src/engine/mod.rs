//! Headless list view engine.
//!
//! This module turns a master collection plus a handful of live inputs into the
//! capped, filtered collection a list screen renders, along with a count summary.
//! It owns no widgets: inputs arrive through [`ValueSource`] ports and outputs
//! leave through caller-supplied sinks.
//!
//! # Architecture
//!
//! ```text
//! TextInput / Selector ──► ValueSource ──┐
//!                                        ▼
//! master Vec<T> ──► ViewEngine::refresh ──► visible sink (Arc<[T]>)
//!                                        ├─► summary sink (&str)
//!                                        └─► on_refresh hook
//! ```
//!
//! # Modules
//!
//! - [`source`]: Input ports (`TextInput`, `Selector`, `StaticValue`, `FnSource`)
//! - [`filter`]: Column filter and global search rules, sentinels, normalization
//! - [`cap`]: Page-size cap parsing and resolution
//! - [`summary`]: Summary line policy
//! - [`view`]: The engine, its builder and the visible result
//!
//! # Threading
//!
//! The engine and its input handles are single-threaded (`Rc`-based). Every
//! refresh runs to completion on the calling thread.

pub mod cap;
pub mod filter;
pub mod source;
pub mod summary;
pub mod view;

pub use cap::SizeCap;
pub use filter::{normalize, FilterRule, Predicate, SearchRule, Sentinels};
pub use source::{FnSource, Selector, StaticValue, TextInput, ValueSource};
pub use summary::{effective_label, summarize, DEFAULT_ENTITY_LABEL};
pub use view::{ViewEngine, ViewEngineBuilder, VisibleResult};
