//! PricePulse Core — price series, technical indicators, composite trading signal.
//!
//! This crate contains the analysis engine:
//! - Validated, time-ascending price series
//! - Indicators: SMA, EMA, Wilder RSI, MACD (undefined warm-up slots are `None`)
//! - Factor scoring (trend, momentum, convergence) and a weighted composite
//! - Signal synthesis: BUY / SELL / HOLD with confidence and narrative
//! - Deterministic synthetic series for callers that need fallback data
//!
//! Everything here is a pure function of its input: no I/O, no global state.

pub mod domain;
pub mod error;
pub mod indicators;
pub mod signal;
pub mod synthetic;

pub use domain::{PricePoint, PriceSeries};
pub use error::{AnalysisError, Result};
pub use indicators::{IndicatorSeries, MacdResult};
pub use signal::{analyze, generate_signal, Action, Analysis, Signal, SignalConfig};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all public engine types are Send + Sync.
    ///
    /// Callers analyze independent assets on worker threads; if any type
    /// stops being shareable the build breaks here.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::PricePoint>();
        require_sync::<domain::PricePoint>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();

        // Indicator types
        require_send::<indicators::IndicatorSeries>();
        require_sync::<indicators::IndicatorSeries>();
        require_send::<indicators::MacdResult>();
        require_sync::<indicators::MacdResult>();
        require_send::<indicators::Sma>();
        require_sync::<indicators::Sma>();
        require_send::<indicators::Ema>();
        require_sync::<indicators::Ema>();
        require_send::<indicators::Rsi>();
        require_sync::<indicators::Rsi>();
        require_send::<indicators::Macd>();
        require_sync::<indicators::Macd>();

        // Signal types
        require_send::<signal::SignalConfig>();
        require_sync::<signal::SignalConfig>();
        require_send::<signal::SignalSynthesizer>();
        require_sync::<signal::SignalSynthesizer>();
        require_send::<signal::Signal>();
        require_sync::<signal::Signal>();
        require_send::<signal::Analysis>();
        require_sync::<signal::Analysis>();

        // Errors
        require_send::<error::AnalysisError>();
        require_sync::<error::AnalysisError>();
    }

    /// Architecture contract: indicators see only the price series.
    ///
    /// `Indicator::compute` takes `&PriceSeries` and nothing else, so no
    /// indicator can depend on another's output or on caller state.
    #[test]
    fn indicator_trait_takes_only_the_series() {
        let series = PriceSeries::from_values(0, 60_000, &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let boxed: Vec<Box<dyn indicators::Indicator>> = vec![
            Box::new(indicators::Sma::new(3).unwrap()),
            Box::new(indicators::Ema::new(3).unwrap()),
            Box::new(indicators::Rsi::new(3).unwrap()),
        ];
        for indicator in &boxed {
            let output = indicator.compute(&series);
            assert_eq!(output.len(), series.len(), "{}", indicator.name());
            assert_eq!(
                output.first_defined_index(),
                Some(indicator.lookback()),
                "{}",
                indicator.name()
            );
        }
    }
}
