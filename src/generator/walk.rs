//! Mean-reverting random walk with volatility clustering

use rand::Rng;
use rand_distr::StandardNormal;

/// Parameters of the stochastic overlay.
///
/// Each day's return standard deviation is
/// `decay * prev_vol + shock_weight * |prev_return| + floor`, capped at `cap`
/// when sampling. Each price is `(1 - reversion)` of the random-walk step plus
/// `reversion` of that day's base trend value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkModel {
    pub initial_vol: f64,
    pub decay: f64,
    pub shock_weight: f64,
    pub floor: f64,
    pub cap: f64,
    pub reversion: f64,
}

impl Default for WalkModel {
    fn default() -> Self {
        Self {
            initial_vol: 0.015,
            decay: 0.95,
            shock_weight: 0.05,
            floor: 0.008,
            cap: 0.03,
            reversion: 0.02,
        }
    }
}

impl WalkModel {
    /// Draw daily returns with clustered volatility
    pub fn returns<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        let mut returns = Vec::with_capacity(n);
        if n == 0 {
            return returns;
        }

        let mut vol = self.initial_vol;
        returns.push(self.draw(rng, vol));
        for i in 1..n {
            vol = self.decay * vol + self.shock_weight * returns[i - 1].abs() + self.floor;
            returns.push(self.draw(rng, vol.min(self.cap)));
        }
        returns
    }

    /// Walk from `base[0]`, pulling each step back toward `base[i]`
    pub fn walk(&self, base: &[f64], returns: &[f64]) -> Vec<f64> {
        let mut prices = Vec::with_capacity(base.len());
        let Some(&first) = base.first() else {
            return prices;
        };

        prices.push(first);
        for i in 1..base.len().min(returns.len()) {
            let step = prices[i - 1] * (1.0 + returns[i]);
            prices.push((1.0 - self.reversion) * step + self.reversion * base[i]);
        }
        prices
    }

    fn draw<R: Rng>(&self, rng: &mut R, std_dev: f64) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        z * std_dev
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_returns_are_bounded_by_cap() {
        let model = WalkModel::default();
        let mut rng = StdRng::seed_from_u64(7);
        let returns = model.returns(5_000, &mut rng);
        assert_eq!(returns.len(), 5_000);

        // 6 sigma at the cap
        assert!(returns.iter().all(|r| r.abs() < model.cap * 6.0));
    }

    #[test]
    fn test_zero_returns_follow_reversion() {
        let model = WalkModel::default();
        let base = [50.0, 60.0, 60.0];
        let prices = model.walk(&base, &[0.0, 0.0, 0.0]);

        assert_eq!(prices[0], 50.0);
        assert!((prices[1] - (0.98 * 50.0 + 0.02 * 60.0)).abs() < 1e-12);
        assert!(prices[2] > prices[1]);
        assert!(prices[2] < 60.0);
    }

    #[test]
    fn test_empty_inputs() {
        let model = WalkModel::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(model.returns(0, &mut rng).is_empty());
        assert!(model.walk(&[], &[]).is_empty());
    }

    #[test]
    fn test_seeded_returns_repeat() {
        let model = WalkModel::default();
        let a = model.returns(100, &mut StdRng::seed_from_u64(42));
        let b = model.returns(100, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
