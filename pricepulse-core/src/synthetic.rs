//! Deterministic synthetic price series.
//!
//! Callers substitute these when real market data is unavailable or too short.
//! A seed fully determines the series; per-asset seeds are derived by hashing
//! the asset name with a master seed, so the same asset always gets the same
//! fallback regardless of the order in which assets are processed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::PriceSeries;
use crate::error::{AnalysisError, Result};

/// Prices never fall below this floor.
pub const MIN_SYNTHETIC_PRICE: f64 = 0.01;

/// Longest series `generate` will build.
pub const MAX_SYNTHETIC_POINTS: usize = 10_000_000;

/// Random-walk parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticSeries {
    pub start_price: f64,
    pub start_time_ms: i64,
    pub step_ms: i64,
    /// Per-step return is uniform in `[-max_step_return, max_step_return]`.
    pub max_step_return: f64,
    pub seed: u64,
}

impl Default for SyntheticSeries {
    fn default() -> Self {
        Self {
            start_price: 100.0,
            start_time_ms: 1_700_000_000_000,
            step_ms: 3_600_000,
            max_step_return: 0.02,
            seed: 42,
        }
    }
}

impl SyntheticSeries {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Derive a deterministic seed for `asset` from `master_seed`.
    pub fn seed_for(asset: &str, master_seed: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&master_seed.to_le_bytes());
        hasher.update(asset.as_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    /// Generate `points` samples. Fails with `InvalidArgument` for zero points
    /// or non-sensical parameters.
    pub fn generate(&self, points: usize) -> Result<PriceSeries> {
        if points == 0 {
            return Err(AnalysisError::invalid("synthetic series needs at least one point"));
        }
        if points > MAX_SYNTHETIC_POINTS {
            return Err(AnalysisError::invalid(format!(
                "synthetic series is capped at {MAX_SYNTHETIC_POINTS} points, got {points}"
            )));
        }
        if !(self.start_price.is_finite() && self.start_price > 0.0) {
            return Err(AnalysisError::invalid(format!(
                "start_price must be finite and positive, got {}",
                self.start_price
            )));
        }
        if !(self.max_step_return.is_finite() && (0.0..1.0).contains(&self.max_step_return)) {
            return Err(AnalysisError::invalid(format!(
                "max_step_return must be in [0, 1), got {}",
                self.max_step_return
            )));
        }
        if self.step_ms < 0 {
            return Err(AnalysisError::invalid("step_ms must be >= 0"));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut price = self.start_price;
        let mut values = Vec::with_capacity(points);

        for i in 0..points {
            if i > 0 {
                let step_return = if self.max_step_return > 0.0 {
                    rng.gen_range(-self.max_step_return..=self.max_step_return)
                } else {
                    0.0
                };
                price = (price * (1.0 + step_return)).max(MIN_SYNTHETIC_PRICE);
            }
            values.push(price);
        }

        PriceSeries::from_values(self.start_time_ms, self.step_ms, &values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_series() {
        let a = SyntheticSeries::with_seed(7).generate(100).unwrap();
        let b = SyntheticSeries::with_seed(7).generate(100).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = SyntheticSeries::with_seed(7).generate(50).unwrap();
        let b = SyntheticSeries::with_seed(8).generate(50).unwrap();
        assert_ne!(a.values(), b.values());
    }

    #[test]
    fn first_point_is_start_price() {
        let series = SyntheticSeries::default().generate(3).unwrap();
        assert_eq!(series.points()[0].value, 100.0);
        assert_eq!(series.points()[0].time, 1_700_000_000_000);
        assert_eq!(series.points()[1].time, 1_700_003_600_000);
    }

    #[test]
    fn steps_stay_within_bounds() {
        let params = SyntheticSeries::with_seed(3);
        let values = params.generate(500).unwrap().values();
        for w in values.windows(2) {
            let r = w[1] / w[0] - 1.0;
            assert!(r.abs() <= params.max_step_return + 1e-12, "step return {r}");
        }
    }

    #[test]
    fn zero_return_is_flat() {
        let params = SyntheticSeries {
            max_step_return: 0.0,
            ..SyntheticSeries::default()
        };
        let values = params.generate(10).unwrap().values();
        assert!(values.iter().all(|&v| v == 100.0));
    }

    #[test]
    fn zero_points_is_invalid() {
        assert!(matches!(
            SyntheticSeries::default().generate(0),
            Err(AnalysisError::InvalidArgument(_))
        ));
    }

    #[test]
    fn bad_parameters_are_invalid() {
        let negative = SyntheticSeries {
            start_price: -1.0,
            ..SyntheticSeries::default()
        };
        assert!(negative.generate(5).is_err());

        let wild = SyntheticSeries {
            max_step_return: 1.5,
            ..SyntheticSeries::default()
        };
        assert!(wild.generate(5).is_err());
    }

    #[test]
    fn oversized_requests_are_invalid() {
        assert!(matches!(
            SyntheticSeries::default().generate(usize::MAX),
            Err(AnalysisError::InvalidArgument(_))
        ));

        let late = SyntheticSeries {
            start_time_ms: i64::MAX - 1,
            ..SyntheticSeries::default()
        };
        assert!(matches!(
            late.generate(3),
            Err(AnalysisError::InvalidArgument(_))
        ));
    }

    #[test]
    fn asset_seeds_are_deterministic_and_distinct() {
        assert_eq!(
            SyntheticSeries::seed_for("BTC", 42),
            SyntheticSeries::seed_for("BTC", 42)
        );
        assert_ne!(
            SyntheticSeries::seed_for("BTC", 42),
            SyntheticSeries::seed_for("ETH", 42)
        );
        assert_ne!(
            SyntheticSeries::seed_for("BTC", 42),
            SyntheticSeries::seed_for("BTC", 43)
        );
    }
}
