//! Query engine implementation
//!
//! Provides the read-only operations served to the frontend:
//! - Price and event filtering
//! - Descriptive statistics and annualized log-return volatility
//! - Event impact (mean price before vs after an event inside a window)
//! - Distinct categories and the overall date range

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event::EventRecord;
use crate::price::PriceObservation;
use crate::storage::DataStore;
use crate::{Error, Result};
use super::filter::{self, DateRange, EventFilter};
use super::stats;

/// Default half-width of an event window, in calendar days
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Summary statistics for a price range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStatistics {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation of prices
    #[serde(rename = "std")]
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
    /// Annualized log-return volatility; `None` with fewer than two returns
    #[serde(rename = "volatility")]
    pub annualized_volatility: Option<f64>,
}

impl std::fmt::Display for PriceStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Price Statistics:")?;
        writeln!(f, "  Count: {}", self.count)?;
        writeln!(f, "  Mean: {:.2}", self.mean)?;
        writeln!(f, "  Median: {:.2}", self.median)?;
        writeln!(f, "  Std Dev: {:.2}", self.std_dev)?;
        writeln!(f, "  Min: {:.2}", self.min)?;
        writeln!(f, "  Max: {:.2}", self.max)?;
        match self.annualized_volatility {
            Some(v) => writeln!(f, "  Volatility: {:.4}", v),
            None => writeln!(f, "  Volatility: n/a"),
        }
    }
}

/// Before/after comparison around an event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactSummary {
    pub price_before: f64,
    pub price_after: f64,
    pub absolute_change: f64,
    pub percentage_change: f64,
}

impl ImpactSummary {
    /// `None` when `price_before` is zero and the percentage is undefined
    pub fn from_means(price_before: f64, price_after: f64) -> Option<Self> {
        if price_before == 0.0 {
            return None;
        }
        let absolute_change = price_after - price_before;
        Some(Self {
            price_before,
            price_after,
            absolute_change,
            percentage_change: absolute_change / price_before * 100.0,
        })
    }
}

/// Prices around an event and the computed impact, if any
#[derive(Debug, Clone, PartialEq)]
pub struct EventImpact {
    pub event_date: NaiveDate,
    pub window_days: u32,
    pub window: Vec<PriceObservation>,
    /// `None` unless the window holds prices both strictly before and
    /// strictly after the event
    pub impact: Option<ImpactSummary>,
}

/// Distinct event categories and impact levels, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categories {
    pub categories: Vec<String>,
    pub impact_levels: Vec<String>,
}

/// First and last date of the price table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Query engine over an immutable store
pub struct QueryEngine<'a> {
    store: &'a DataStore,
}

impl<'a> QueryEngine<'a> {
    /// Create a new query engine
    pub fn new(store: &'a DataStore) -> Self {
        Self { store }
    }

    /// Prices inside `range`, ascending by date
    pub fn filter_prices(&self, range: DateRange) -> &'a [PriceObservation] {
        filter::filter_prices(self.store.prices(), range)
    }

    /// Events matching every predicate set on `filter`, ascending by date
    pub fn filter_events(&self, filter: &EventFilter) -> Vec<&'a EventRecord> {
        filter.apply(self.store.events())
    }

    /// Descriptive statistics over the prices inside `range`.
    ///
    /// Fails with [`Error::EmptyRange`] when fewer than two observations
    /// remain, since the standard deviation is undefined.
    pub fn statistics(&self, range: DateRange) -> Result<PriceStatistics> {
        let rows = self.filter_prices(range);
        if rows.len() < 2 {
            return Err(Error::EmptyRange { count: rows.len() });
        }

        let prices: Vec<f64> = rows.iter().map(|p| p.price).collect();
        let empty = || Error::EmptyRange { count: prices.len() };

        Ok(PriceStatistics {
            mean: stats::mean(&prices).ok_or_else(empty)?,
            median: stats::median(&prices).ok_or_else(empty)?,
            std_dev: stats::sample_std_dev(&prices).ok_or_else(empty)?,
            min: stats::min(&prices).ok_or_else(empty)?,
            max: stats::max(&prices).ok_or_else(empty)?,
            count: prices.len(),
            annualized_volatility: stats::annualized_volatility(&prices),
        })
    }

    /// Mean price before vs after `event_date` within `±window_days`.
    pub fn event_impact(&self, event_date: NaiveDate, window_days: u32) -> EventImpact {
        let window = self.filter_prices(DateRange::around(event_date, window_days));

        let before: Vec<f64> = window.iter().filter(|p| p.date < event_date).map(|p| p.price).collect();
        let after: Vec<f64> = window.iter().filter(|p| p.date > event_date).map(|p| p.price).collect();

        let impact = match (stats::mean(&before), stats::mean(&after)) {
            (Some(price_before), Some(price_after)) => ImpactSummary::from_means(price_before, price_after),
            _ => None,
        };

        tracing::debug!(
            "Event impact at {} (±{}d): {} before, {} after, impact={:?}",
            event_date,
            window_days,
            before.len(),
            after.len(),
            impact
        );

        EventImpact {
            event_date,
            window_days,
            window: window.to_vec(),
            impact,
        }
    }

    /// Distinct categories and impact levels across all events
    pub fn categories(&self) -> Categories {
        let events = self.store.events();
        Categories {
            categories: distinct(events.iter().map(|e| e.category.as_str())),
            impact_levels: distinct(events.iter().map(|e| e.impact_level.as_str())),
        }
    }

    /// Bounds of the full, unfiltered price table
    pub fn date_range(&self) -> Option<DateBounds> {
        let prices = self.store.prices();
        Some(DateBounds {
            start_date: prices.first()?.date,
            end_date: prices.last()?.date,
        })
    }
}

fn distinct<'s>(values: impl Iterator<Item = &'s str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
