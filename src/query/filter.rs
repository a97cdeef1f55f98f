//! Filter predicates over the price and event tables
//!
//! Each filter is a plain value with a pure `contains`/`matches` test.
//! Event filters compose their predicates left-to-right: category, then
//! impact level, then date range.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::event::EventRecord;
use crate::price::PriceObservation;

/// Inclusive date range. A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// The unbounded range
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// `[center - days, center + days]`. Bounds that fall outside the
    /// representable calendar are left open.
    pub fn around(center: NaiveDate, days: u32) -> Self {
        let span = Days::new(u64::from(days));
        Self::new(center.checked_sub_days(span), center.checked_add_days(span))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bound = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "*".to_string());
        write!(f, "{} .. {}", bound(self.start), bound(self.end))
    }
}

/// Select the observations inside `range`.
///
/// `rows` must be sorted ascending by date; the bounds are located by binary
/// search and the result is a sub-slice, so the output is itself sorted and
/// filtering it again with the same range returns it unchanged.
pub fn filter_prices(rows: &[PriceObservation], range: DateRange) -> &[PriceObservation] {
    let lo = match range.start {
        Some(start) => rows.partition_point(|p| p.date < start),
        None => 0,
    };
    let hi = match range.end {
        Some(end) => rows.partition_point(|p| p.date <= end),
        None => rows.len(),
    };

    if lo >= hi {
        return &[];
    }
    &rows[lo..hi]
}

/// Conjunctive event filter. Every unset field matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    pub category: Option<String>,
    pub impact_level: Option<String>,
    pub range: DateRange,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_impact_level(mut self, impact_level: impl Into<String>) -> Self {
        self.impact_level = Some(impact_level.into());
        self
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    pub fn matches(&self, event: &EventRecord) -> bool {
        self.category_matches(event) && self.impact_matches(event) && self.range.contains(event.date)
    }

    fn category_matches(&self, event: &EventRecord) -> bool {
        self.category.as_deref().is_none_or(|c| event.category == c)
    }

    fn impact_matches(&self, event: &EventRecord) -> bool {
        self.impact_level.as_deref().is_none_or(|l| event.impact_level == l)
    }

    /// Apply the filter, keeping the input order
    pub fn apply<'a>(&self, events: &'a [EventRecord]) -> Vec<&'a EventRecord> {
        events.iter().filter(|e| self.matches(e)).collect()
    }
}
