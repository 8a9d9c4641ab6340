//! Result summary text.

/// Label used when the caller gives none.
pub const DEFAULT_ENTITY_LABEL: &str = "items";

/// Returns the label to use, falling back to [`DEFAULT_ENTITY_LABEL`] when blank.
#[must_use]
pub fn effective_label(label: Option<&str>) -> &str {
    label
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_ENTITY_LABEL)
}

/// Formats the summary line for a refresh.
///
/// The checks run in order: nothing matched, everything matched is visible, or
/// the cap hid part of the result.
///
/// ```rust
/// use tableview::engine::summarize;
///
/// assert_eq!(summarize(0, 0, Some("repairs")), "No repairs to show.");
/// assert_eq!(summarize(3, 3, None), "Showing 3 items.");
/// assert_eq!(summarize(1, 2, Some("invoices")), "Showing 1 of 2 invoices.");
/// ```
#[must_use]
pub fn summarize(visible: usize, total: usize, label: Option<&str>) -> String {
    let label = effective_label(label);
    if total == 0 {
        format!("No {label} to show.")
    } else if visible == total {
        format!("Showing {total} {label}.")
    } else {
        format!("Showing {visible} of {total} {label}.")
    }
}
