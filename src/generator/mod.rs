//! Synthetic daily price series
//!
//! Builds a plausible oil price history in four passes:
//! 1. a piecewise base trend per market era ([`trend`])
//! 2. a mean-reverting random walk with clustered volatility ([`walk`])
//! 3. multiplicative shocks around historical events ([`shocks`])
//! 4. era-dependent clamping, then rounding to cents
//!
//! Weekends are skipped. Runs are reproducible only when a seed is given.

pub mod shocks;
pub mod trend;
pub mod walk;

use chrono::{Datelike, NaiveDate, Weekday};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::price::{PriceObservation, format_price_date};
use crate::{Error, Result};
use shocks::EVENT_SHOCKS;
use walk::WalkModel;

/// Upper clamp on generated prices
pub const PRICE_CAP: f64 = 150.0;

pub const DEFAULT_START: NaiveDate = ymd(1987, 5, 20);
pub const DEFAULT_END: NaiveDate = ymd(2022, 9, 30);

/// Calendar date constant; invalid dates fail at compile time
pub(crate) const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid calendar date"),
    }
}

/// Price floor for the era a date falls in
pub fn era_floor(year: i32) -> f64 {
    match year {
        ..=1999 => 10.0,
        2000..=2009 => 20.0,
        _ => 25.0,
    }
}

/// Generator settings
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// `None` seeds from OS entropy
    pub seed: Option<u64>,
    pub walk: WalkModel,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            end: DEFAULT_END,
            seed: None,
            walk: WalkModel::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = start;
        self.end = end;
        self
    }
}

/// Synthetic price generator
pub struct Generator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        if config.end < config.start {
            return Err(Error::InvalidParameter(format!(
                "generator end {} is before start {}",
                config.end, config.start
            )));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Weekdays from start to end, inclusive
    pub fn trading_days(&self) -> Vec<NaiveDate> {
        self.config
            .start
            .iter_days()
            .take_while(|d| *d <= self.config.end)
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .collect()
    }

    /// Produce the full series
    pub fn generate(&mut self) -> Vec<PriceObservation> {
        let dates = self.trading_days();
        tracing::info!(
            "Generating {} trading days from {} to {}",
            dates.len(),
            self.config.start,
            self.config.end
        );

        let base: Vec<f64> = dates.iter().map(|d| trend::base_price(*d)).collect();
        let model = self.config.walk;
        let returns = model.returns(dates.len(), &mut self.rng);
        let mut prices = model.walk(&base, &returns);

        shocks::apply_shocks(&dates, &mut prices, EVENT_SHOCKS);

        dates
            .iter()
            .zip(prices)
            .map(|(date, price)| {
                let clamped = price.min(PRICE_CAP).max(era_floor(date.year()));
                PriceObservation::new(*date, round_cents(clamped))
            })
            .collect()
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Facts reported after a generator run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationSummary {
    pub records: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub min_price: f64,
    pub max_price: f64,
}

impl GenerationSummary {
    pub fn from_rows(rows: &[PriceObservation]) -> Option<Self> {
        let first = rows.first()?;
        let last = rows.last()?;
        let (min_price, max_price) = rows
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| (lo.min(r.price), hi.max(r.price)));

        Some(Self {
            records: rows.len(),
            first_date: first.date,
            last_date: last.date,
            min_price,
            max_price,
        })
    }
}

impl std::fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Generated {} records", self.records)?;
        writeln!(
            f,
            "Date range: {} to {}",
            format_price_date(self.first_date),
            format_price_date(self.last_date)
        )?;
        writeln!(f, "Price range: ${:.2} to ${:.2}", self.min_price, self.max_price)
    }
}
