//! Flat-file schema definitions

use serde::{Deserialize, Serialize};

/// Header row of the price table
pub const PRICE_COLUMNS: [&str; 2] = ["Date", "Price"];

/// Header row of the event table
pub const EVENT_COLUMNS: [&str; 5] = ["Date", "Event", "Description", "Category", "Impact_Level"];

/// Raw price table row. `date` is still in `DD-Mon-YY` form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Price")]
    pub price: f64,
}

/// Raw event table row. `date` is still an ISO string.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Event")]
    pub event: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Impact_Level")]
    pub impact_level: String,
}
