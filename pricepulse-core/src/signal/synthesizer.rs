//! The decision procedure: compute indicators, score factors, pick an action.

use tracing::{debug, trace};

use super::config::SignalConfig;
use super::narrative;
use super::scoring::{convergence_score, momentum_score, trend_score, FactorScores};
use super::{Action, Analysis, IndicatorSnapshot, Signal};
use crate::domain::PriceSeries;
use crate::error::{AnalysisError, Result};
use crate::indicators::{Indicator, IndicatorSeries, Macd, MacdResult, Rsi, Sma};

/// Validated configuration bound to its indicator instances.
#[derive(Debug, Clone)]
pub struct SignalSynthesizer {
    config: SignalConfig,
    sma_short: Sma,
    sma_long: Sma,
    rsi: Rsi,
    macd: Macd,
}

impl SignalSynthesizer {
    /// Fails with `InvalidArgument` when the configuration is malformed.
    pub fn new(config: SignalConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sma_short: Sma::new(config.short_window)?,
            sma_long: Sma::new(config.long_window)?,
            rsi: Rsi::new(config.rsi_period)?,
            macd: Macd::new(config.macd_fast, config.macd_slow, config.macd_signal)?,
            config,
        })
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Minimum series length for every indicator to have one defined value.
    pub fn required_history(&self) -> usize {
        [
            self.sma_short.lookback(),
            self.sma_long.lookback(),
            self.rsi.lookback(),
            self.macd.lookback(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
        .saturating_add(1)
    }

    /// Compute every indicator stream and the composite signal.
    pub fn analyze(&self, series: &PriceSeries) -> Result<Analysis> {
        let required = self.required_history();
        trace!(required, available = series.len(), "checking history");
        if series.len() < required {
            return Err(AnalysisError::InsufficientHistory {
                required,
                available: series.len(),
            });
        }

        let sma_short = self.sma_short.compute(series);
        let sma_long = self.sma_long.compute(series);
        let rsi = self.rsi.compute(series);
        let macd = self.macd.compute(series);

        let signal = self.synthesize(series, &sma_short, &sma_long, &rsi, &macd)?;

        Ok(Analysis {
            sma_short,
            sma_long,
            rsi,
            macd,
            signal,
        })
    }

    /// Compute only the composite signal.
    pub fn generate(&self, series: &PriceSeries) -> Result<Signal> {
        self.analyze(series).map(|analysis| analysis.signal)
    }

    fn synthesize(
        &self,
        series: &PriceSeries,
        sma_short: &IndicatorSeries,
        sma_long: &IndicatorSeries,
        rsi: &IndicatorSeries,
        macd: &MacdResult,
    ) -> Result<Signal> {
        let missing = || AnalysisError::InsufficientHistory {
            required: self.required_history(),
            available: series.len(),
        };

        let snapshot = IndicatorSnapshot {
            sma_short: sma_short.latest().ok_or_else(missing)?,
            sma_long: sma_long.latest().ok_or_else(missing)?,
            rsi: rsi.latest().ok_or_else(missing)?,
            macd_line: macd.macd_line.latest().ok_or_else(missing)?,
            macd_signal: macd.signal_line.latest().ok_or_else(missing)?,
            histogram: macd.histogram.latest().ok_or_else(missing)?,
            price: series.latest_value(),
        };

        let config = &self.config;
        let window = config.histogram_window;
        let scores = FactorScores {
            trend: trend_score(snapshot.sma_short, snapshot.sma_long, config.trend_sensitivity),
            momentum: momentum_score(snapshot.rsi, config.rsi_oversold, config.rsi_overbought),
            convergence: convergence_score(
                &macd.histogram.recent_defined(window),
                &macd.macd_line.recent_defined(window),
                snapshot.price,
            ),
        };

        let composite = scores.composite(&config.weights);
        let action = if composite >= config.buy_threshold {
            Action::Buy
        } else if composite <= config.sell_threshold {
            Action::Sell
        } else {
            Action::Hold
        };
        let confidence = (composite.abs() * 100.0).round().clamp(0.0, 100.0);

        debug!(
            trend = scores.trend,
            momentum = scores.momentum,
            convergence = scores.convergence,
            composite,
            %action,
            confidence,
            "signal synthesized"
        );

        Ok(Signal {
            action,
            confidence,
            composite,
            scores,
            summary: narrative::summary(action, confidence, &scores, &snapshot, config),
            bullet_points: narrative::bullet_points(&scores, &snapshot, config),
            indicators: snapshot,
        })
    }
}

/// Compute the composite signal for `series` under `config`.
pub fn generate_signal(series: &PriceSeries, config: &SignalConfig) -> Result<Signal> {
    SignalSynthesizer::new(config.clone())?.generate(series)
}

/// Compute every indicator stream and the composite signal for `series` under `config`.
pub fn analyze(series: &PriceSeries, config: &SignalConfig) -> Result<Analysis> {
    SignalSynthesizer::new(config.clone())?.analyze(series)
}
