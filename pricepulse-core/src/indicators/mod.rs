//! Concrete indicator implementations.
//!
//! SMA, EMA and RSI implement the single-series `Indicator` trait. MACD
//! produces three aligned streams and exposes its own `compute`, returning a
//! `MacdResult`. All of them read a `PriceSeries` without mutating it and
//! return fresh `IndicatorSeries` values.

pub mod ema;
pub mod indicator;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use ema::{compute_ema, ema_of_values, Ema};
pub use indicator::{Indicator, IndicatorSeries};
pub use macd::{compute_macd, Macd, MacdResult};
pub use rsi::{compute_rsi, Rsi};
pub use sma::{compute_sma, sma_of_values, Sma};

/// Build a series from prices spaced one minute apart, for tests.
#[cfg(test)]
pub fn make_series(values: &[f64]) -> crate::domain::PriceSeries {
    crate::domain::PriceSeries::from_values(1_700_000_000_000, 60_000, values).unwrap()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
