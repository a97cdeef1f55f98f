//! Piecewise base trend, one formula per market era

use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate};

use super::ymd;

/// Lowest value the base trend may take
pub const BASE_FLOOR: f64 = 10.0;

const LEHMAN: NaiveDate = ymd(2008, 9, 15);
const PANDEMIC: NaiveDate = ymd(2020, 3, 11);
const INVASION: NaiveDate = ymd(2022, 2, 24);

/// Fraction of the calendar year elapsed before `date` (Jan 1 is 0.0)
pub fn year_progress(date: NaiveDate) -> f64 {
    f64::from(date.ordinal0()) / 365.0
}

/// Deterministic base price for a trading day.
pub fn base_price(date: NaiveDate) -> f64 {
    let year = date.year();
    let p = year_progress(date);
    let since = |anchor: NaiveDate| (date - anchor).num_days() as f64;
    let seasonal = |amplitude: f64| amplitude * (2.0 * PI * p).sin();
    let years_from = |origin: i32| f64::from(year - origin);

    let base = match year {
        ..=1989 => 18.0 + seasonal(2.0),
        1990..=1999 => 20.0 + seasonal(5.0),
        // Steady climb into the 2000s commodity boom
        2000..=2007 => 25.0 + years_from(2000) * 10.0 + seasonal(10.0),
        2008 if date < LEHMAN => 120.0 - 20.0 * p,
        2008 => 100.0 - 60.0 * since(LEHMAN) / 100.0,
        2009..=2013 => 40.0 + years_from(2009) * 12.0 + seasonal(20.0),
        2014..=2015 => 100.0 - years_from(2014) * 25.0 - 10.0 * p,
        2016..=2019 => 50.0 + years_from(2016) * 5.0 + seasonal(10.0),
        2020 if date < PANDEMIC => 65.0,
        2020 => 65.0 - (since(PANDEMIC) * 0.5).min(40.0),
        2021 => 25.0 + p * 50.0,
        _ if date < INVASION => 75.0 + p * 20.0,
        _ => 95.0 + seasonal(15.0),
    };

    base.max(BASE_FLOOR)
}
