//! Indicator trait and the output series container.
//!
//! Indicators are pure functions: a price series in, a series of the same
//! length out. Slots before the indicator has enough history are `None`, so
//! arithmetic on missing data cannot happen silently.

use serde::{Deserialize, Serialize};

use crate::domain::PriceSeries;

/// Trait for single-series indicators.
///
/// # Look-ahead contamination guard
/// No value at index t may depend on prices at t+1 or later.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_12", "rsi_14").
    fn name(&self) -> &str;

    /// Number of leading slots that are always `None`.
    fn lookback(&self) -> usize;

    /// Compute the indicator over the whole series.
    ///
    /// Returns an `IndicatorSeries` of the same length as `series`.
    fn compute(&self, series: &PriceSeries) -> IndicatorSeries;
}

/// Ordered indicator output, one slot per input price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSeries {
    values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }

    /// A series of `len` undefined slots.
    pub fn undefined(len: usize) -> Self {
        Self {
            values: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`; `None` when undefined or out of bounds.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn as_slice(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.values.iter().copied()
    }

    /// Most recent defined value.
    pub fn latest(&self) -> Option<f64> {
        self.values.iter().rev().find_map(|v| *v)
    }

    /// Index of the first defined slot.
    pub fn first_defined_index(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Defined values in order, with their positions dropped.
    pub fn defined_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(|v| *v).collect()
    }

    /// Up to `n` most recent defined values, oldest first.
    pub fn recent_defined(&self, n: usize) -> Vec<f64> {
        let mut tail: Vec<f64> = self.values.iter().rev().filter_map(|v| *v).take(n).collect();
        tail.reverse();
        tail
    }
}

impl From<Vec<Option<f64>>> for IndicatorSeries {
    fn from(values: Vec<Option<f64>>) -> Self {
        Self::new(values)
    }
}
