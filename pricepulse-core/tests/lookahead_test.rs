//! Look-ahead contamination tests for every indicator.
//!
//! Invariant: no indicator value at index t may depend on prices after t.
//!
//! Method: compute on a truncated series (points 0..100) and on the full
//! series (points 0..200). Assert points 0..100 are identical between both
//! runs. Any difference means future data leaked into past values.

use pricepulse_core::indicators::{Ema, Indicator, IndicatorSeries, Macd, Rsi, Sma};
use pricepulse_core::PriceSeries;

/// Generate N prices with realistic variation.
fn make_test_series(n: usize) -> PriceSeries {
    let mut values = Vec::with_capacity(n);
    let mut price = 100.0;

    for i in 0..n {
        // Deterministic pseudo-random walk using a simple LCG
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed % 200) as f64 - 100.0) * 0.05; // -5.0 to +5.0
        price += change;
        price = f64::max(price, 10.0); // floor at 10
        values.push(price);
    }

    PriceSeries::from_values(1_700_000_000_000, 60_000, &values).unwrap()
}

fn truncate(series: &PriceSeries, len: usize) -> PriceSeries {
    PriceSeries::new(series.points()[..len].to_vec()).unwrap()
}

fn assert_prefix_identical(name: &str, truncated: &IndicatorSeries, full: &IndicatorSeries) {
    for i in 0..truncated.len() {
        assert_eq!(
            truncated.get(i).map(f64::to_bits),
            full.get(i).map(f64::to_bits),
            "{name}: look-ahead at index {i}"
        );
    }
}

fn assert_no_lookahead(indicator: &dyn Indicator, full: &PriceSeries, truncated_len: usize) {
    let truncated = truncate(full, truncated_len);
    let full_result = indicator.compute(full);
    let truncated_result = indicator.compute(&truncated);

    assert_eq!(
        truncated_result.len(),
        truncated_len,
        "{}: truncated result length mismatch",
        indicator.name()
    );
    assert_prefix_identical(indicator.name(), &truncated_result, &full_result);
}

#[test]
fn single_series_indicators_have_no_lookahead() {
    let full = make_test_series(200);
    let indicators: Vec<Box<dyn Indicator>> = vec![
        Box::new(Sma::new(12).unwrap()),
        Box::new(Sma::new(48).unwrap()),
        Box::new(Ema::new(26).unwrap()),
        Box::new(Rsi::new(14).unwrap()),
    ];
    for indicator in &indicators {
        assert_no_lookahead(indicator.as_ref(), &full, 100);
    }
}

#[test]
fn macd_has_no_lookahead() {
    let full = make_test_series(200);
    let truncated = truncate(&full, 100);
    let macd = Macd::default();

    let a = macd.compute(&truncated);
    let b = macd.compute(&full);
    assert_prefix_identical("macd_line", &a.macd_line, &b.macd_line);
    assert_prefix_identical("signal_line", &a.signal_line, &b.signal_line);
    assert_prefix_identical("histogram", &a.histogram, &b.histogram);
}
