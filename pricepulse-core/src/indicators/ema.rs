//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * price[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (period + 1).
//! Seed: EMA[period-1] = SMA of the first `period` values.
//! Lookback: period - 1.

use super::indicator::{Indicator, IndicatorSeries};
use crate::domain::PriceSeries;
use crate::error::{AnalysisError, Result};

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(AnalysisError::invalid("EMA period must be >= 1"));
        }
        Ok(Self {
            period,
            name: format!("ema_{period}"),
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Smoothing factor applied to each new value.
    pub fn alpha(&self) -> f64 {
        smoothing_factor(self.period)
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, series: &PriceSeries) -> IndicatorSeries {
        smooth(&series.values(), self.period).into()
    }
}

/// Compute the EMA of a price series.
///
/// Unlike [`Ema::compute`], a period longer than the series is rejected:
/// the caller asked for a smoothing it can never seed.
pub fn compute_ema(series: &PriceSeries, period: usize) -> Result<IndicatorSeries> {
    let ema = Ema::new(period)?;
    if period > series.len() {
        return Err(AnalysisError::invalid(format!(
            "EMA period {period} exceeds series length {}",
            series.len()
        )));
    }
    Ok(ema.compute(series))
}

/// EMA of an arbitrary value slice.
///
/// Used by composed indicators (MACD signal line) that smooth derived series.
/// Short input yields all `None`; an empty slice or zero period is rejected.
pub fn ema_of_values(values: &[f64], period: usize) -> Result<Vec<Option<f64>>> {
    if values.is_empty() {
        return Err(AnalysisError::invalid("cannot smooth an empty sequence"));
    }
    if period == 0 {
        return Err(AnalysisError::invalid("EMA period must be >= 1"));
    }
    Ok(smooth(values, period))
}

fn smoothing_factor(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

pub(super) fn smooth(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];

    if n < period {
        return result;
    }

    let alpha = smoothing_factor(period);

    // Seed: SMA of first `period` values
    let seed = values[..period].iter().sum::<f64>() / period as f64;
    result[period - 1] = Some(seed);

    let mut prev = seed;
    for i in period..n {
        let ema = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = Some(ema);
        prev = ema;
    }

    result
}
