//! Page-size cap resolution.
//!
//! The page-size selector truncates the filtered result from the front. It does not
//! page: there is no offset and no "next page". A missing, blank, non-numeric,
//! non-positive or sentinel selection means no cap at all, so a selector set to
//! `0` or `All` shows everything rather than nothing.

use super::filter::Sentinels;
use std::num::NonZeroUsize;

/// Effective size cap for one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeCap {
    /// Show every filtered item.
    #[default]
    Unlimited,
    /// Show at most this many items.
    Limit(NonZeroUsize),
}

impl SizeCap {
    /// Builds a cap from a number, treating zero as unlimited.
    #[must_use]
    pub fn from_count(count: usize) -> Self {
        NonZeroUsize::new(count).map_or(Self::Unlimited, Self::Limit)
    }

    /// Parses a selector value.
    ///
    /// ```rust
    /// use tableview::engine::{Sentinels, SizeCap};
    ///
    /// let sentinels = Sentinels::default();
    /// assert_eq!(SizeCap::parse(Some("25"), &sentinels), SizeCap::from_count(25));
    /// assert_eq!(SizeCap::parse(Some("All"), &sentinels), SizeCap::Unlimited);
    /// assert_eq!(SizeCap::parse(Some("-3"), &sentinels), SizeCap::Unlimited);
    /// assert_eq!(SizeCap::parse(None, &sentinels), SizeCap::Unlimited);
    /// ```
    #[must_use]
    pub fn parse(value: Option<&str>, sentinels: &Sentinels) -> Self {
        let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Self::Unlimited;
        };
        if sentinels.contains(raw) {
            return Self::Unlimited;
        }
        match raw.parse::<i64>() {
            Ok(n) if n > 0 => usize::try_from(n).map_or(Self::Unlimited, Self::from_count),
            Ok(_) => Self::Unlimited,
            Err(_) => {
                tracing::debug!(value = %raw, "unrecognized page size, showing all");
                Self::Unlimited
            }
        }
    }

    /// Returns how many of `total` filtered items are visible under this cap.
    #[must_use]
    pub fn resolve(self, total: usize) -> usize {
        match self {
            Self::Unlimited => total,
            Self::Limit(limit) => limit.get().min(total),
        }
    }
}
