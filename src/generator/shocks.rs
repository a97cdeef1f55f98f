//! Historical event shocks applied on top of the simulated walk

use chrono::NaiveDate;

use super::ymd;

/// Trading days before the event that feel the shock
pub const SHOCK_LEAD_DAYS: usize = 5;
/// Trading days from the event (exclusive end) that feel the shock
pub const SHOCK_TRAIL_DAYS: usize = 15;
/// Exponential decay constant, in trading days
pub const SHOCK_DECAY_DAYS: f64 = 5.0;
/// Shocks whose nearest trading day is further than this are outside the series
pub const MAX_ANCHOR_GAP_DAYS: i64 = 7;

/// A multiplicative price shock anchored on a calendar date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventShock {
    pub date: NaiveDate,
    pub multiplier: f64,
    pub label: &'static str,
}

pub const EVENT_SHOCKS: &[EventShock] = &[
    EventShock { date: ymd(1990, 8, 2), multiplier: 1.3, label: "Iraq invades Kuwait" },
    EventShock { date: ymd(2001, 9, 11), multiplier: 1.15, label: "September 11 attacks" },
    EventShock { date: ymd(2003, 3, 20), multiplier: 1.1, label: "Iraq War" },
    EventShock { date: ymd(2005, 8, 29), multiplier: 1.2, label: "Hurricane Katrina" },
    EventShock { date: ymd(2008, 9, 15), multiplier: 0.7, label: "Financial crisis" },
    EventShock { date: ymd(2011, 2, 15), multiplier: 1.15, label: "Arab Spring" },
    EventShock { date: ymd(2014, 11, 27), multiplier: 0.75, label: "OPEC holds output" },
    EventShock { date: ymd(2019, 9, 14), multiplier: 1.2, label: "Abqaiq attack" },
    EventShock { date: ymd(2020, 3, 11), multiplier: 0.6, label: "COVID-19 pandemic" },
    EventShock { date: ymd(2022, 2, 24), multiplier: 1.25, label: "Russia invades Ukraine" },
];

impl EventShock {
    /// Multiplier for a trading day `distance` days away from the event
    pub fn effect(&self, distance: usize) -> f64 {
        1.0 + (self.multiplier - 1.0) * (-(distance as f64) / SHOCK_DECAY_DAYS).exp()
    }
}

/// Index of the date closest to `target`; the earliest one on ties
pub fn nearest_index(dates: &[NaiveDate], target: NaiveDate) -> Option<usize> {
    dates
        .iter()
        .enumerate()
        .min_by_key(|(_, d)| (**d - target).num_days().abs())
        .map(|(i, _)| i)
}

/// Multiply `prices` in place around each shock's nearest trading day
pub fn apply_shocks(dates: &[NaiveDate], prices: &mut [f64], shocks: &[EventShock]) {
    let n = dates.len().min(prices.len());

    for shock in shocks {
        let Some(idx) = nearest_index(&dates[..n], shock.date) else {
            continue;
        };
        if (dates[idx] - shock.date).num_days().abs() > MAX_ANCHOR_GAP_DAYS {
            continue;
        }

        let from = idx.saturating_sub(SHOCK_LEAD_DAYS);
        let to = (idx + SHOCK_TRAIL_DAYS).min(n);
        for (j, price) in prices.iter_mut().enumerate().take(to).skip(from) {
            *price *= shock.effect(j.abs_diff(idx));
        }

        tracing::trace!("Applied {} (x{}) at index {}", shock.label, shock.multiplier, idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekdays(from: NaiveDate, count: usize) -> Vec<NaiveDate> {
        use chrono::{Datelike, Weekday};
        from.iter_days()
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .take(count)
            .collect()
    }

    #[test]
    fn test_table_is_sorted() {
        assert_eq!(EVENT_SHOCKS.len(), 10);
        assert!(EVENT_SHOCKS.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_effect_decays() {
        let shock = EventShock { date: ymd(2020, 3, 11), multiplier: 0.6, label: "test" };
        assert!((shock.effect(0) - 0.6).abs() < 1e-12);
        assert!(shock.effect(5) > shock.effect(0));
        assert!(shock.effect(14) < 1.0);
        assert!((shock.effect(5) - (1.0 - 0.4 * (-1.0f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn test_nearest_index_weekend_event() {
        // 2019-09-14 is a Saturday: Friday 13th and Monday 16th are not equally
        // close (1 vs 2 days), so Friday wins
        let dates = weekdays(ymd(2019, 9, 9), 10);
        let idx = nearest_index(&dates, ymd(2019, 9, 14)).unwrap();
        assert_eq!(dates[idx], ymd(2019, 9, 13));

        // Equidistant neighbours resolve to the earlier date
        let dates = vec![ymd(2020, 1, 1), ymd(2020, 1, 3)];
        assert_eq!(nearest_index(&dates, ymd(2020, 1, 2)), Some(0));
        assert_eq!(nearest_index(&[], ymd(2020, 1, 2)), None);
    }

    #[test]
    fn test_apply_shock_window() {
        let dates = weekdays(ymd(2020, 2, 3), 50);
        let mut prices = vec![100.0; dates.len()];
        let shock = EventShock { date: ymd(2020, 3, 11), multiplier: 0.6, label: "test" };
        apply_shocks(&dates, &mut prices, &[shock]);

        let idx = dates.iter().position(|d| *d == ymd(2020, 3, 11)).unwrap();
        assert!((prices[idx] - 60.0).abs() < 1e-9);
        // Untouched outside [idx - 5, idx + 15)
        assert_eq!(prices[idx - 6], 100.0);
        assert!(prices[idx - 5] < 100.0);
        assert!(prices[idx + 14] < 100.0);
        assert_eq!(prices[idx + 15], 100.0);
    }

    #[test]
    fn test_shock_near_series_start() {
        let dates = weekdays(ymd(1990, 8, 1), 20);
        let mut prices = vec![20.0; dates.len()];
        apply_shocks(&dates, &mut prices, EVENT_SHOCKS);

        assert!((prices[1] - 26.0).abs() < 1e-9);
        assert!(prices[0] > 20.0);
        // Later shocks fall outside this short series and are skipped
        assert_eq!(prices[19], 20.0);
    }
}
