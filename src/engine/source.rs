//! Input ports that feed live values into the view engine.
//!
//! A list screen binds each filter to a widget: a text field, a dropdown, a
//! page-size selector. The engine never talks to a widget directly; it asks a
//! [`ValueSource`] for the widget's current value at refresh time. This keeps the
//! engine free of any toolkit dependency and lets tests drive it headlessly.
//!
//! # Provided Sources
//!
//! - [`TextInput`]: a free-text field handle the controller writes into
//! - [`Selector`]: an enumerated set of options with at most one selected
//! - [`StaticValue`]: a fixed value, mostly useful in tests
//! - [`FnSource`]: adapts any closure returning `Option<String>`
//!
//! `TextInput` and `Selector` are cheap handles over shared state. Clone one,
//! hand the clone to the engine, and keep the other to mutate between refreshes.
//!
//! # Example
//!
//! ```rust
//! use tableview::engine::{TextInput, ValueSource};
//!
//! let field = TextInput::new();
//! let bound = field.clone();
//!
//! field.set("Bob");
//! assert_eq!(bound.current_value().as_deref(), Some("Bob"));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Provider of the current value of one input.
///
/// Returning `None` and returning a blank string are equivalent: both mean the
/// input has no value and any rule bound to it is inactive.
pub trait ValueSource {
    /// Returns the value the input holds right now.
    fn current_value(&self) -> Option<String>;
}

impl<S: ValueSource + ?Sized> ValueSource for Box<S> {
    fn current_value(&self) -> Option<String> {
        (**self).current_value()
    }
}

impl<S: ValueSource + ?Sized> ValueSource for Rc<S> {
    fn current_value(&self) -> Option<String> {
        (**self).current_value()
    }
}

/// Handle to a free-text input field.
///
/// Clones share the same underlying text.
#[derive(Clone, Default)]
pub struct TextInput {
    text: Rc<RefCell<String>>,
}

impl TextInput {
    /// Creates an empty text input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a text input holding `text`.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Rc::new(RefCell::new(text.into())),
        }
    }

    /// Replaces the field contents.
    pub fn set(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
    }

    /// Empties the field.
    pub fn clear(&self) {
        self.text.borrow_mut().clear();
    }

    /// Returns a copy of the field contents.
    #[must_use]
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

impl ValueSource for TextInput {
    fn current_value(&self) -> Option<String> {
        Some(self.text.borrow().clone())
    }
}

impl fmt::Debug for TextInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextInput").field("text", &*self.text.borrow()).finish()
    }
}

#[derive(Debug, Default)]
struct SelectorState {
    options: Vec<String>,
    selected: Option<usize>,
}

/// Handle to an enumerated selector (dropdown, combo box).
///
/// Holds an ordered list of options and at most one selected index. Its value is
/// the selected option's text, or `None` when nothing is selected. Clones share
/// the same underlying state.
///
/// # Example
///
/// ```rust
/// use tableview::engine::{Selector, ValueSource};
///
/// let status = Selector::new(["All", "Open", "Closed"]);
/// assert_eq!(status.current_value().as_deref(), Some("All"));
///
/// status.select("closed");
/// assert_eq!(status.current_value().as_deref(), Some("Closed"));
/// ```
#[derive(Clone, Default)]
pub struct Selector {
    state: Rc<RefCell<SelectorState>>,
}

impl Selector {
    /// Creates a selector with the given options, selecting the first one.
    #[must_use]
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let selected = if options.is_empty() { None } else { Some(0) };
        Self {
            state: Rc::new(RefCell::new(SelectorState { options, selected })),
        }
    }

    /// Builds the standard page-size selector.
    ///
    /// Options are the given sizes in order followed by `all_label`, which acts as
    /// the "no cap" sentinel. The first size is selected.
    ///
    /// ```rust
    /// use tableview::engine::{Selector, ValueSource};
    ///
    /// let page = Selector::page_sizes(&[10, 25, 50], "All");
    /// assert_eq!(page.options(), vec!["10", "25", "50", "All"]);
    /// assert_eq!(page.current_value().as_deref(), Some("10"));
    /// ```
    #[must_use]
    pub fn page_sizes(sizes: &[usize], all_label: &str) -> Self {
        Self::new(
            sizes
                .iter()
                .map(ToString::to_string)
                .chain(std::iter::once(all_label.to_string())),
        )
    }

    /// Selects the option matching `option` case-insensitively.
    ///
    /// Returns `true` when a match was found. An unknown option clears the
    /// selection, mirroring a combo box whose model no longer contains the value.
    pub fn select(&self, option: &str) -> bool {
        let mut state = self.state.borrow_mut();
        let wanted = option.trim().to_lowercase();
        state.selected = state.options.iter().position(|o| o.to_lowercase() == wanted);
        state.selected.is_some()
    }

    /// Selects the option at `index`. Out-of-range indices clear the selection.
    pub fn select_index(&self, index: usize) {
        let mut state = self.state.borrow_mut();
        state.selected = (index < state.options.len()).then_some(index);
    }

    /// Clears the selection.
    pub fn clear_selection(&self) {
        self.state.borrow_mut().selected = None;
    }

    /// Replaces the option list, keeping the selection only if the previously
    /// selected text is still present.
    pub fn set_options<I, S>(&self, options: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = self.state.borrow_mut();
        let previous = state.selected.and_then(|i| state.options.get(i).cloned());
        state.options = options.into_iter().map(Into::into).collect();
        state.selected = previous.and_then(|p| state.options.iter().position(|o| *o == p));
    }

    /// Returns a copy of the option list.
    #[must_use]
    pub fn options(&self) -> Vec<String> {
        self.state.borrow().options.clone()
    }

    /// Returns the selected index, if any.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.state.borrow().selected
    }
}

impl ValueSource for Selector {
    fn current_value(&self) -> Option<String> {
        let state = self.state.borrow();
        state.selected.and_then(|i| state.options.get(i).cloned())
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Selector")
            .field("options", &state.options)
            .field("selected", &state.selected)
            .finish()
    }
}

/// A source whose value never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticValue(pub Option<String>);

impl StaticValue {
    /// Creates a source that always yields `value`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(Some(value.into()))
    }

    /// Creates a source with no value.
    #[must_use]
    pub const fn empty() -> Self {
        Self(None)
    }
}

impl ValueSource for StaticValue {
    fn current_value(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Adapts a closure into a [`ValueSource`].
///
/// ```rust
/// use tableview::engine::{FnSource, ValueSource};
///
/// let source = FnSource(|| Some("open".to_string()));
/// assert_eq!(source.current_value().as_deref(), Some("open"));
/// ```
#[derive(Clone, Copy)]
pub struct FnSource<F>(pub F);

impl<F> ValueSource for FnSource<F>
where
    F: Fn() -> Option<String>,
{
    fn current_value(&self) -> Option<String> {
        (self.0)()
    }
}

impl<F> fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnSource(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_input_clones_share_contents() {
        let field = TextInput::new();
        let bound = field.clone();
        assert_eq!(bound.current_value().as_deref(), Some(""));

        field.set("repair");
        assert_eq!(bound.current_value().as_deref(), Some("repair"));

        field.clear();
        assert_eq!(bound.text(), "");
    }

    #[test]
    fn text_input_starts_with_given_text() {
        let field = TextInput::with_text("AB-123");
        assert_eq!(field.text(), "AB-123");
        assert_eq!(field.clone().current_value().as_deref(), Some("AB-123"));
    }

    #[test]
    fn cleared_selector_has_no_value() {
        let selector = Selector::new(["All", "Open"]);
        selector.clear_selection();
        assert_eq!(selector.selected_index(), None);
        assert_eq!(selector.current_value(), None);

        selector.select_index(1);
        assert_eq!(selector.current_value().as_deref(), Some("Open"));
    }

    #[test]
    fn selector_defaults_to_first_option() {
        let selector = Selector::new(["Todos", "Abierto"]);
        assert_eq!(selector.selected_index(), Some(0));
        assert_eq!(selector.current_value().as_deref(), Some("Todos"));
    }

    #[test]
    fn empty_selector_has_no_value() {
        let selector = Selector::new(Vec::<String>::new());
        assert_eq!(selector.current_value(), None);
    }

    #[test]
    fn selecting_unknown_option_clears_selection() {
        let selector = Selector::new(["All", "Open"]);
        assert!(selector.select("OPEN"));
        assert_eq!(selector.current_value().as_deref(), Some("Open"));

        assert!(!selector.select("archived"));
        assert_eq!(selector.current_value(), None);
    }

    #[test]
    fn select_index_out_of_range_clears() {
        let selector = Selector::new(["a", "b"]);
        selector.select_index(1);
        assert_eq!(selector.current_value().as_deref(), Some("b"));
        selector.select_index(5);
        assert_eq!(selector.selected_index(), None);
    }

    #[test]
    fn set_options_keeps_surviving_selection() {
        let selector = Selector::new(["All", "Open", "Closed"]);
        selector.select("Closed");

        selector.set_options(["All", "Closed"]);
        assert_eq!(selector.current_value().as_deref(), Some("Closed"));

        selector.set_options(["All", "Open"]);
        assert_eq!(selector.current_value(), None);
    }

    #[test]
    fn page_size_selector_ends_with_sentinel() {
        let page = Selector::page_sizes(&[5, 20], "Todos");
        assert_eq!(page.options(), vec!["5", "20", "Todos"]);
        page.select_index(2);
        assert_eq!(page.current_value().as_deref(), Some("Todos"));
    }

    #[test]
    fn boxed_and_shared_sources_delegate() {
        let boxed: Box<dyn ValueSource> = Box::new(StaticValue::new("x"));
        assert_eq!(boxed.current_value().as_deref(), Some("x"));

        let shared: Rc<dyn ValueSource> = Rc::new(StaticValue::empty());
        assert_eq!(shared.current_value(), None);
    }
}
