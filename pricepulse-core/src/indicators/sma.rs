//! Simple Moving Average (SMA).
//!
//! Rolling mean of prices over a lookback window.
//! Lookback: window - 1 (first defined value at index window-1).

use super::indicator::{Indicator, IndicatorSeries};
use crate::domain::PriceSeries;
use crate::error::{AnalysisError, Result};

#[derive(Debug, Clone)]
pub struct Sma {
    window: usize,
    name: String,
}

impl Sma {
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(AnalysisError::invalid("SMA window must be >= 1"));
        }
        Ok(Self {
            window,
            name: format!("sma_{window}"),
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window - 1
    }

    fn compute(&self, series: &PriceSeries) -> IndicatorSeries {
        rolling_mean(&series.values(), self.window).into()
    }
}

/// SMA over a raw slice. Fails on an empty slice or a zero window.
pub fn sma_of_values(values: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    if values.is_empty() {
        return Err(AnalysisError::invalid("cannot average an empty sequence"));
    }
    if window == 0 {
        return Err(AnalysisError::invalid("SMA window must be >= 1"));
    }
    Ok(rolling_mean(values, window))
}

/// Compute the SMA of a price series.
pub fn compute_sma(series: &PriceSeries, window: usize) -> Result<IndicatorSeries> {
    Ok(Sma::new(window)?.compute(series))
}

fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];

    if n < window {
        return result;
    }

    let mut sum: f64 = values[..window].iter().sum();
    result[window - 1] = Some(sum / window as f64);

    for i in window..n {
        sum += values[i] - values[i - window];
        result[i] = Some(sum / window as f64);
    }

    result
}
