//! Signal synthesis — turns the latest indicator reads into one recommendation.
//!
//! The synthesizer sees only the price series and the indicator outputs it
//! computes from it. A `Signal` is a value object: built fresh on every call,
//! never mutated afterwards, never persisted.

pub mod config;
pub mod narrative;
pub mod scoring;
pub mod synthesizer;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::indicators::{IndicatorSeries, MacdResult};

pub use config::{SignalConfig, Weights};
pub use scoring::{Factor, FactorScores};
pub use synthesizer::{analyze, generate_signal, SignalSynthesizer};

/// Recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Hold => "HOLD",
        })
    }
}

/// Latest defined value of every indicator stream, plus the latest price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub sma_short: f64,
    pub sma_long: f64,
    pub rsi: f64,
    pub macd_line: f64,
    pub macd_signal: f64,
    pub histogram: f64,
    pub price: f64,
}

/// Composite recommendation with its rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub action: Action,
    /// `round(|composite| * 100)`, always within [0, 100].
    pub confidence: f64,
    /// Weighted composite score in [-1, 1].
    pub composite: f64,
    pub scores: FactorScores,
    pub summary: String,
    pub bullet_points: Vec<String>,
    pub indicators: IndicatorSnapshot,
}

/// Full engine output: indicator streams for charting plus the signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub sma_short: IndicatorSeries,
    pub sma_long: IndicatorSeries,
    pub rsi: IndicatorSeries,
    pub macd: MacdResult,
    pub signal: Signal,
}
