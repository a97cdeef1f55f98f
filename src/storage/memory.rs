//! Immutable in-memory store for the price and event tables

use std::path::Path;

use serde::Serialize;

use crate::Result;
use crate::event::EventRecord;
use crate::price::PriceObservation;
use super::loader;

/// Read-only store holding both tables for the life of the process.
///
/// Both tables are sorted ascending by date on construction and never
/// mutated afterwards, so a store can be shared across threads freely.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    prices: Vec<PriceObservation>,
    events: Vec<EventRecord>,
}

impl DataStore {
    /// Load both tables from disk
    pub fn load(prices_path: &Path, events_path: &Path) -> Result<Self> {
        let prices = loader::load_prices(prices_path)?;
        let events = loader::load_events(events_path)?;
        let store = Self::from_parts(prices, events);

        tracing::info!(
            "Loaded {} prices from {} and {} events from {}",
            store.prices.len(),
            prices_path.display(),
            store.events.len(),
            events_path.display()
        );
        Ok(store)
    }

    /// Build a store from rows already in memory
    pub fn from_parts(mut prices: Vec<PriceObservation>, mut events: Vec<EventRecord>) -> Self {
        prices.sort_by_key(|p| p.date);
        events.sort_by_key(|e| e.date);
        Self { prices, events }
    }

    /// All prices, ascending by date
    pub fn prices(&self) -> &[PriceObservation] {
        &self.prices
    }

    /// All events, ascending by date
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            prices: self.prices.len(),
            events: self.events.len(),
            first_date: self.prices.first().map(|p| p.date.to_string()),
            last_date: self.prices.last().map(|p| p.date.to_string()),
        }
    }
}

/// Store size summary
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub prices: usize,
    pub events: usize,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Store Statistics:")?;
        writeln!(f, "  Prices: {}", self.prices)?;
        writeln!(f, "  Events: {}", self.events)?;
        match (&self.first_date, &self.last_date) {
            (Some(first), Some(last)) => writeln!(f, "  Range: {} .. {}", first, last),
            _ => writeln!(f, "  Range: (empty)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_parts_sorts() {
        let store = DataStore::from_parts(
            vec![
                PriceObservation::new(date(2022, 1, 5), 85.0),
                PriceObservation::new(date(2022, 1, 1), 75.0),
                PriceObservation::new(date(2022, 1, 3), 80.0),
            ],
            vec![
                EventRecord::new(date(2020, 3, 11), "COVID", "Economic", "High"),
                EventRecord::new(date(1990, 8, 2), "Gulf War", "Geopolitical", "High"),
            ],
        );

        let dates: Vec<_> = store.prices().iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![date(2022, 1, 1), date(2022, 1, 3), date(2022, 1, 5)]);
        assert_eq!(store.events()[0].event, "Gulf War");
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let prices = dir.path().join("prices.csv");
        let events = dir.path().join("events.csv");
        std::fs::write(&prices, "Date,Price\n05-Jan-22,85.0\n03-Jan-22,80.0\n").unwrap();
        std::fs::write(
            &events,
            "Date,Event,Description,Category,Impact_Level\n2022-02-24,Invasion,,Geopolitical,High\n",
        )
        .unwrap();

        let store = DataStore::load(&prices, &events).unwrap();
        assert_eq!(store.prices().len(), 2);
        assert_eq!(store.prices()[0].date, date(2022, 1, 3));
        assert_eq!(store.events().len(), 1);

        let stats = store.stats();
        assert_eq!(stats.first_date.as_deref(), Some("2022-01-03"));
        assert!(stats.to_string().contains("Events: 1"));
    }

    #[test]
    fn test_load_fails_when_events_missing() {
        let dir = tempfile::tempdir().unwrap();
        let prices = dir.path().join("prices.csv");
        std::fs::write(&prices, "Date,Price\n03-Jan-22,80.0\n").unwrap();

        assert!(DataStore::load(&prices, &dir.path().join("events.csv")).is_err());
    }
}
