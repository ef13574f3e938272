//! Relative Strength Index (RSI).
//!
//! Uses Wilder smoothing of average gains and average losses.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period (first defined value once `period` deltas exist).
//! Edge cases: avg_loss == 0 → 100; both averages 0 (flat market) → 50.

use super::indicator::{Indicator, IndicatorSeries};
use crate::domain::PriceSeries;
use crate::error::{AnalysisError, Result};

/// Conventional RSI lookback.
pub const DEFAULT_RSI_PERIOD: usize = 14;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(AnalysisError::invalid("RSI period must be >= 1"));
        }
        Ok(Self {
            period,
            name: format!("rsi_{period}"),
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self {
            period: DEFAULT_RSI_PERIOD,
            name: format!("rsi_{DEFAULT_RSI_PERIOD}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> IndicatorSeries {
        let values = series.values();
        let n = values.len();
        let period = self.period;
        let mut result = vec![None; n];

        if n <= period {
            return result.into();
        }

        let changes: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();

        // Seed: simple mean of gains and losses over the first `period` changes
        let mut avg_gain = 0.0;
        let mut avg_loss = 0.0;
        for &ch in &changes[..period] {
            if ch > 0.0 {
                avg_gain += ch;
            } else {
                avg_loss -= ch;
            }
        }
        avg_gain /= period as f64;
        avg_loss /= period as f64;

        result[period] = Some(rsi_value(avg_gain, avg_loss));

        // Wilder smoothing; changes[i - 1] is the move into price i
        let weight = (period - 1) as f64;
        for i in (period + 1)..n {
            let ch = changes[i - 1];
            let gain = ch.max(0.0);
            let loss = (-ch).max(0.0);

            avg_gain = (avg_gain * weight + gain) / period as f64;
            avg_loss = (avg_loss * weight + loss) / period as f64;

            result[i] = Some(rsi_value(avg_gain, avg_loss));
        }

        result.into()
    }
}

/// Compute RSI of a price series.
pub fn compute_rsi(series: &PriceSeries, period: usize) -> Result<IndicatorSeries> {
    Ok(Rsi::new(period)?.compute(series))
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else {
        (100.0 - 100.0 / (1.0 + avg_gain / avg_loss)).clamp(0.0, 100.0)
    }
}
