//! Synthesizer configuration: indicator windows, factor weights, thresholds,
//! and the scoring constants that pin the decision procedure down.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::indicators::macd::{DEFAULT_MACD_FAST, DEFAULT_MACD_SIGNAL, DEFAULT_MACD_SLOW};
use crate::indicators::rsi::DEFAULT_RSI_PERIOD;

pub const DEFAULT_SHORT_WINDOW: usize = 12;
pub const DEFAULT_LONG_WINDOW: usize = 48;
pub const DEFAULT_BUY_THRESHOLD: f64 = 0.2;
pub const DEFAULT_SELL_THRESHOLD: f64 = -0.2;
/// A 10% spread between the short and long SMA saturates the trend score.
pub const DEFAULT_TREND_SENSITIVITY: f64 = 10.0;
pub const DEFAULT_RSI_OVERSOLD: f64 = 30.0;
pub const DEFAULT_RSI_OVERBOUGHT: f64 = 70.0;
/// Number of recent defined MACD/histogram values used to normalize the convergence score.
pub const DEFAULT_HISTOGRAM_WINDOW: usize = 20;

/// Relative weight of each factor in the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Weights {
    pub trend: f64,
    pub momentum: f64,
    pub convergence: f64,
}

impl Weights {
    pub fn total(&self) -> f64 {
        self.trend + self.momentum + self.convergence
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            trend: 0.4,
            momentum: 0.3,
            convergence: 0.3,
        }
    }
}

/// Everything the synthesizer needs besides the series itself.
///
/// Every field has a default, so a TOML table may set any subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignalConfig {
    pub short_window: usize,
    pub long_window: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub buy_threshold: f64,
    pub sell_threshold: f64,
    pub trend_sensitivity: f64,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub histogram_window: usize,
    /// Kept last so it serializes as a trailing TOML table.
    pub weights: Weights,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            short_window: DEFAULT_SHORT_WINDOW,
            long_window: DEFAULT_LONG_WINDOW,
            rsi_period: DEFAULT_RSI_PERIOD,
            macd_fast: DEFAULT_MACD_FAST,
            macd_slow: DEFAULT_MACD_SLOW,
            macd_signal: DEFAULT_MACD_SIGNAL,
            buy_threshold: DEFAULT_BUY_THRESHOLD,
            sell_threshold: DEFAULT_SELL_THRESHOLD,
            trend_sensitivity: DEFAULT_TREND_SENSITIVITY,
            rsi_oversold: DEFAULT_RSI_OVERSOLD,
            rsi_overbought: DEFAULT_RSI_OVERBOUGHT,
            histogram_window: DEFAULT_HISTOGRAM_WINDOW,
            weights: Weights::default(),
        }
    }
}

impl SignalConfig {
    /// Check every configuration rule; the first violation is reported.
    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("short_window", self.short_window),
            ("long_window", self.long_window),
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("histogram_window", self.histogram_window),
        ];
        for (name, value) in periods {
            if value == 0 {
                return Err(AnalysisError::invalid(format!("{name} must be >= 1")));
            }
        }

        if self.macd_fast >= self.macd_slow {
            return Err(AnalysisError::invalid(format!(
                "macd_fast ({}) must be less than macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }

        let w = &self.weights;
        for (name, value) in [
            ("trend", w.trend),
            ("momentum", w.momentum),
            ("convergence", w.convergence),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AnalysisError::invalid(format!(
                    "weight '{name}' must be finite and non-negative, got {value}"
                )));
            }
        }
        if w.total() <= 0.0 {
            return Err(AnalysisError::invalid("weights must sum to a positive value"));
        }

        if !(self.buy_threshold > 0.0 && self.buy_threshold <= 1.0) {
            return Err(AnalysisError::invalid(format!(
                "buy_threshold must be in (0, 1], got {}",
                self.buy_threshold
            )));
        }
        if !(self.sell_threshold < 0.0 && self.sell_threshold >= -1.0) {
            return Err(AnalysisError::invalid(format!(
                "sell_threshold must be in [-1, 0), got {}",
                self.sell_threshold
            )));
        }

        if !(self.trend_sensitivity.is_finite() && self.trend_sensitivity > 0.0) {
            return Err(AnalysisError::invalid(format!(
                "trend_sensitivity must be finite and positive, got {}",
                self.trend_sensitivity
            )));
        }

        let rsi_band = 0.0..=100.0;
        if !rsi_band.contains(&self.rsi_oversold)
            || !rsi_band.contains(&self.rsi_overbought)
            || self.rsi_oversold >= self.rsi_overbought
        {
            return Err(AnalysisError::invalid(format!(
                "RSI bounds must satisfy 0 <= oversold < overbought <= 100, got {}/{}",
                self.rsi_oversold, self.rsi_overbought
            )));
        }

        Ok(())
    }
}
