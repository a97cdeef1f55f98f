//! Response bodies in the shape the charting frontend expects
//!
//! Price series are sent columnar (`dates` and `prices` as parallel arrays)
//! with ISO dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event::EventRecord;
use crate::price::{self, PriceObservation};
use crate::query::{EventImpact, ImpactSummary};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            message: "API is running".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PricesResponse {
    pub dates: Vec<NaiveDate>,
    pub prices: Vec<f64>,
}

impl From<&[PriceObservation]> for PricesResponse {
    fn from(rows: &[PriceObservation]) -> Self {
        let (dates, prices) = price::columns(rows);
        Self { dates, prices }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<EventRecord>,
}

impl<'a> FromIterator<&'a EventRecord> for EventsResponse {
    fn from_iter<I: IntoIterator<Item = &'a EventRecord>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventImpactResponse {
    pub dates: Vec<NaiveDate>,
    pub prices: Vec<f64>,
    pub event_date: NaiveDate,
    pub impact: Option<ImpactSummary>,
}

impl From<EventImpact> for EventImpactResponse {
    fn from(result: EventImpact) -> Self {
        let (dates, prices) = price::columns(&result.window);
        Self {
            dates,
            prices,
            event_date: result.event_date,
            impact: result.impact,
        }
    }
}
