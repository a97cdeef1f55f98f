//! Descriptive statistics over price slices
//!
//! Functions return `None` instead of NaN when the input is too short for
//! the statistic to be defined.

/// Assumed trading days per year when annualizing volatility
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; the average of the two middle values for even lengths
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Sample standard deviation (n-1 denominator)
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mean_val = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean_val).powi(2)).sum();
    Some((sum_sq / (n - 1) as f64).sqrt())
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Log returns `ln(p[i]) - ln(p[i-1])` over consecutive pairs.
///
/// Pairs with a non-positive price have no defined log return and are skipped.
pub fn log_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .filter_map(|w| {
            if w[0] > 0.0 && w[1] > 0.0 {
                Some(w[1].ln() - w[0].ln())
            } else {
                None
            }
        })
        .collect()
}

/// Sample standard deviation of log returns scaled by √252.
///
/// Needs at least two returns, i.e. three prices.
pub fn annualized_volatility(prices: &[f64]) -> Option<f64> {
    sample_std_dev(&log_returns(prices)).map(|sd| sd * TRADING_DAYS_PER_YEAR.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_mean_median() {
        assert_eq!(mean(&[]), None);
        assert!(approx(mean(&[75.0, 80.0, 85.0]).unwrap(), 80.0));
        assert!(approx(median(&[85.0, 75.0, 80.0]).unwrap(), 80.0));
        assert!(approx(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5));
    }

    #[test]
    fn test_sample_std_dev() {
        assert_eq!(sample_std_dev(&[1.0]), None);
        // Sample variance of 75, 80, 85 is 25
        assert!(approx(sample_std_dev(&[75.0, 80.0, 85.0]).unwrap(), 5.0));
    }

    #[test]
    fn test_min_max() {
        let values = [3.0, -1.0, 7.5];
        assert_eq!(min(&values), Some(-1.0));
        assert_eq!(max(&values), Some(7.5));
        assert_eq!(max(&[]), None);
    }

    #[test]
    fn test_log_returns() {
        let returns = log_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(returns.len(), 2);
        assert!(approx(returns[0], (1.1f64).ln()));
        assert!(approx(returns[1], (0.9f64).ln()));

        assert!(log_returns(&[100.0]).is_empty());
        assert_eq!(log_returns(&[0.0, 10.0, 11.0]).len(), 1);
    }

    #[test]
    fn test_annualized_volatility() {
        // Constant growth has zero dispersion
        let flat = [100.0, 110.0, 121.0, 133.1];
        assert!(annualized_volatility(&flat).unwrap() < 1e-9);

        // Two prices give one return: undefined
        assert_eq!(annualized_volatility(&[100.0, 101.0]), None);

        let prices = [100.0, 110.0, 99.0];
        let r = log_returns(&prices);
        let expected = sample_std_dev(&r).unwrap() * 252f64.sqrt();
        assert!(approx(annualized_volatility(&prices).unwrap(), expected));
    }
}
