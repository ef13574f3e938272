//! Moving Average Convergence/Divergence (MACD).
//!
//! MACD line = EMA(fast) - EMA(slow), defined where both EMAs are.
//! Signal line = EMA(signal) over the defined suffix of the MACD line,
//! placed back onto the original positions.
//! Histogram = MACD line - signal line.
//! Lookback: slow + signal - 2.

use serde::{Deserialize, Serialize};

use super::ema::smooth;
use super::indicator::IndicatorSeries;
use crate::domain::PriceSeries;
use crate::error::{AnalysisError, Result};

pub const DEFAULT_MACD_FAST: usize = 12;
pub const DEFAULT_MACD_SLOW: usize = 26;
pub const DEFAULT_MACD_SIGNAL: usize = 9;

/// The three MACD output streams, index-aligned with the input series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdResult {
    pub macd_line: IndicatorSeries,
    pub signal_line: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Result<Self> {
        if fast == 0 || slow == 0 || signal == 0 {
            return Err(AnalysisError::invalid(format!(
                "MACD periods must be >= 1, got {fast}/{slow}/{signal}"
            )));
        }
        if fast >= slow {
            return Err(AnalysisError::invalid(format!(
                "MACD fast period ({fast}) must be shorter than slow period ({slow})"
            )));
        }
        Ok(Self { fast, slow, signal })
    }

    pub fn fast_period(&self) -> usize {
        self.fast
    }

    pub fn slow_period(&self) -> usize {
        self.slow
    }

    pub fn signal_period(&self) -> usize {
        self.signal
    }

    /// Leading slots that are undefined in the histogram.
    ///
    /// Saturates at `usize::MAX - 2` for periods too large to ever be defined.
    pub fn lookback(&self) -> usize {
        self.slow.saturating_add(self.signal) - 2
    }

    pub fn compute(&self, series: &PriceSeries) -> MacdResult {
        let values = series.values();
        let n = values.len();
        let fast = smooth(&values, self.fast);
        let slow = smooth(&values, self.slow);

        let macd_line: Vec<Option<f64>> = fast
            .iter()
            .zip(slow.iter())
            .map(|(f, s)| Some((*f)? - (*s)?))
            .collect();

        let mut signal_line = vec![None; n];
        if let Some(start) = macd_line.iter().position(Option::is_some) {
            // The MACD line has no holes after its first defined slot.
            let suffix: Vec<f64> = macd_line[start..].iter().flatten().copied().collect();
            for (offset, value) in smooth(&suffix, self.signal).into_iter().enumerate() {
                signal_line[start + offset] = value;
            }
        }

        let histogram: Vec<Option<f64>> = macd_line
            .iter()
            .zip(signal_line.iter())
            .map(|(m, s)| Some((*m)? - (*s)?))
            .collect();

        MacdResult {
            macd_line: macd_line.into(),
            signal_line: signal_line.into(),
            histogram: histogram.into(),
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast: DEFAULT_MACD_FAST,
            slow: DEFAULT_MACD_SLOW,
            signal: DEFAULT_MACD_SIGNAL,
        }
    }
}

/// Compute MACD of a price series.
pub fn compute_macd(
    series: &PriceSeries,
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<MacdResult> {
    Ok(Macd::new(fast, slow, signal)?.compute(series))
}
