//! Price observations
//!
//! One row of the daily price table. The flat-file form stores dates in the
//! compact `DD-Mon-YY` layout (`20-May-87`); everything else in the crate,
//! including the JSON API, uses ISO dates.

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date layout used by the price table (`20-May-87`)
pub const PRICE_DATE_FORMAT: &str = "%d-%b-%y";

/// ISO date layout used by the event table and the API
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A single daily price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub date: NaiveDate,
    pub price: f64,
}

impl PriceObservation {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }

    /// Date in the price table layout
    pub fn table_date(&self) -> String {
        format_price_date(self.date)
    }
}

/// Parse a `DD-Mon-YY` date. Month names are matched case-insensitively.
pub fn parse_price_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), PRICE_DATE_FORMAT)
        .map_err(|e| Error::InvalidParameter(format!("invalid price date '{}': {}", s, e)))
}

/// Format a date as `DD-Mon-YY`
pub fn format_price_date(date: NaiveDate) -> String {
    date.format(PRICE_DATE_FORMAT).to_string()
}

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), ISO_DATE_FORMAT)
        .map_err(|e| Error::InvalidParameter(format!("invalid date '{}': {}", s, e)))
}

/// Split a series into parallel date and price columns
pub fn columns(rows: &[PriceObservation]) -> (Vec<NaiveDate>, Vec<f64>) {
    rows.iter().map(|row| (row.date, row.price)).unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_date_roundtrip() {
        let date = parse_price_date("20-May-87").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1987, 5, 20).unwrap());
        assert_eq!(format_price_date(date), "20-May-87");

        let date = parse_price_date("30-Sep-22").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2022, 9, 30).unwrap());
        assert_eq!(format_price_date(date), "30-Sep-22");
    }

    #[test]
    fn test_price_date_is_case_insensitive() {
        let date = parse_price_date("02-aug-90").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1990, 8, 2).unwrap());
    }

    #[test]
    fn test_invalid_dates() {
        assert!(parse_price_date("1987-05-20").is_err());
        assert!(parse_price_date("32-May-87").is_err());
        assert!(parse_iso_date("20-May-87").is_err());
        assert!(parse_iso_date("2020-02-30").is_err());
    }

    #[test]
    fn test_serializes_iso_date() {
        let obs = PriceObservation::new(NaiveDate::from_ymd_opt(2022, 1, 3).unwrap(), 80.0);
        let json = serde_json::to_string(&obs).unwrap();
        assert_eq!(json, r#"{"date":"2022-01-03","price":80.0}"#);
    }

    #[test]
    fn test_columns() {
        let rows = vec![
            PriceObservation::new(NaiveDate::from_ymd_opt(2022, 1, 3).unwrap(), 80.0),
            PriceObservation::new(NaiveDate::from_ymd_opt(2022, 1, 4).unwrap(), 81.5),
        ];
        let (dates, prices) = columns(&rows);
        assert_eq!(dates.len(), 2);
        assert_eq!(prices, vec![80.0, 81.5]);
    }
}
