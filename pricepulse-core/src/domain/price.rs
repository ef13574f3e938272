//! Price samples and the validated series every indicator consumes.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// A single price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Milliseconds since the Unix epoch.
    pub time: i64,
    pub value: f64,
}

impl PricePoint {
    pub fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

/// Non-empty, time-ascending sequence of price points.
///
/// Timestamps may repeat but never decrease, so index order is chronological
/// order. Values are finite and non-negative. The series is never mutated by
/// the indicators that read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Validate and wrap a sequence of points.
    ///
    /// Fails with `InvalidArgument` when the sequence is empty, a value is
    /// negative or non-finite, or a timestamp goes backwards.
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(AnalysisError::invalid("price series must not be empty"));
        }

        for (i, point) in points.iter().enumerate() {
            if !point.value.is_finite() || point.value < 0.0 {
                return Err(AnalysisError::invalid(format!(
                    "price at index {i} must be finite and non-negative, got {}",
                    point.value
                )));
            }
        }

        if let Some(i) = points.windows(2).position(|w| w[1].time < w[0].time) {
            return Err(AnalysisError::invalid(format!(
                "timestamps must be non-decreasing: index {} ({}) precedes index {} ({})",
                i,
                points[i].time,
                i + 1,
                points[i + 1].time
            )));
        }

        Ok(Self { points })
    }

    /// Build a series from bare values spaced `step_ms` apart starting at `start_ms`.
    pub fn from_values(start_ms: i64, step_ms: i64, values: &[f64]) -> Result<Self> {
        if step_ms < 0 {
            return Err(AnalysisError::invalid("step_ms must be >= 0"));
        }
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let time = i64::try_from(i)
                    .ok()
                    .and_then(|index| step_ms.checked_mul(index))
                    .and_then(|offset| start_ms.checked_add(offset))
                    .ok_or_else(|| {
                        AnalysisError::invalid(format!("timestamp of point {i} overflows i64"))
                    })?;
                Ok(PricePoint::new(time, value))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a `PriceSeries` cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Price values in chronological order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Most recent point.
    pub fn last(&self) -> PricePoint {
        // Non-empty by construction.
        self.points[self.points.len() - 1]
    }

    /// Most recent price value.
    pub fn latest_value(&self) -> f64 {
        self.last().value
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = AnalysisError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}
