//! Property tests for indicator and signal invariants.
//!
//! Uses proptest to verify:
//! 1. SMA shape — n slots, max(0, n-w+1) defined, each the mean of its window
//! 2. EMA seed — the seed slot equals the mean of the first `period` values
//! 3. RSI bounds — always within [0, 100]; monotone series pin it to 0 or 100
//! 4. MACD histogram identity — histogram = macd - signal wherever defined
//! 5. Signal purity — identical input yields bit-identical output
//! 6. Convergence direction — the score never opposes the MACD histogram

use proptest::prelude::*;
use pricepulse_core::indicators::{compute_ema, compute_macd, compute_rsi, compute_sma};
use pricepulse_core::signal::scoring::NEGLIGIBLE_RELATIVE_MAGNITUDE;
use pricepulse_core::signal::{generate_signal, Action, Signal, SignalConfig};
use pricepulse_core::PriceSeries;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_prices(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((1.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0), min_len..max_len)
}

fn series(values: &[f64]) -> PriceSeries {
    PriceSeries::from_values(0, 60_000, values).unwrap()
}

// ── 1. SMA shape ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn sma_defined_count_and_means(values in arb_prices(1, 120), window in 1usize..40) {
        let result = compute_sma(&series(&values), window).unwrap();
        let n = values.len();

        prop_assert_eq!(result.len(), n);
        prop_assert_eq!(result.defined_count(), (n + 1).saturating_sub(window));

        for i in 0..n {
            match result.get(i) {
                Some(v) => {
                    prop_assert!(i + 1 >= window);
                    let reference = values[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
                    prop_assert!((v - reference).abs() <= 1e-9 * reference.abs().max(1.0),
                        "index {}: rolling {} vs reference {}", i, v, reference);
                }
                None => prop_assert!(i + 1 < window),
            }
        }
    }
}

// ── 2. EMA seed ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn ema_seed_is_simple_mean(values in arb_prices(1, 100), period in 1usize..30) {
        prop_assume!(period <= values.len());
        let result = compute_ema(&series(&values), period).unwrap();
        let mean = values[..period].iter().sum::<f64>() / period as f64;

        prop_assert_eq!(result.first_defined_index(), Some(period - 1));
        let seed = result.get(period - 1).unwrap();
        prop_assert!((seed - mean).abs() < 1e-9);
    }
}

// ── 3. RSI bounds ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rsi_stays_in_bounds(values in arb_prices(2, 150), period in 1usize..30) {
        let result = compute_rsi(&series(&values), period).unwrap();
        for v in result.iter().flatten() {
            prop_assert!((0.0..=100.0).contains(&v), "RSI out of bounds: {}", v);
        }
    }

    #[test]
    fn rsi_strictly_rising_is_100(start in 1.0..100.0_f64, step in 0.01..5.0_f64, extra in 1usize..40) {
        let period = 14;
        let values: Vec<f64> = (0..period + extra).map(|i| start + step * i as f64).collect();
        let result = compute_rsi(&series(&values), period).unwrap();
        for v in result.iter().flatten() {
            prop_assert_eq!(v, 100.0);
        }
        prop_assert_eq!(result.defined_count(), extra);
    }

    #[test]
    fn rsi_strictly_falling_is_0(start in 300.0..500.0_f64, step in 0.01..5.0_f64, extra in 1usize..40) {
        let period = 14;
        let values: Vec<f64> = (0..period + extra).map(|i| start - step * i as f64).collect();
        let result = compute_rsi(&series(&values), period).unwrap();
        for v in result.iter().flatten() {
            prop_assert_eq!(v, 0.0);
        }
    }
}

// ── 4. MACD histogram identity ───────────────────────────────────────

proptest! {
    #[test]
    fn macd_histogram_identity(
        values in arb_prices(1, 150),
        fast in 1usize..15,
        gap in 1usize..20,
        signal in 1usize..12,
    ) {
        let result = compute_macd(&series(&values), fast, fast + gap, signal).unwrap();
        for i in 0..values.len() {
            let (m, s, h) = (
                result.macd_line.get(i),
                result.signal_line.get(i),
                result.histogram.get(i),
            );
            match (m, s) {
                (Some(m), Some(s)) => {
                    let h = h.unwrap();
                    prop_assert!((h - (m - s)).abs() < 1e-12);
                }
                _ => prop_assert!(h.is_none()),
            }
        }
    }
}

// ── 5. Signal purity ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn generate_signal_is_idempotent(values in arb_prices(48, 200)) {
        let s = series(&values);
        let config = SignalConfig::default();
        let a = generate_signal(&s, &config).unwrap();
        let b = generate_signal(&s, &config).unwrap();

        prop_assert_eq!(a.composite.to_bits(), b.composite.to_bits());
        prop_assert_eq!(a.confidence.to_bits(), b.confidence.to_bits());
        prop_assert_eq!(&a, &b);
    }

    #[test]
    fn signal_fields_stay_in_range(values in arb_prices(48, 200)) {
        let signal = generate_signal(&series(&values), &SignalConfig::default()).unwrap();
        prop_assert!((-1.0..=1.0).contains(&signal.composite));
        prop_assert!((0.0..=100.0).contains(&signal.confidence));
        prop_assert_eq!(signal.confidence, signal.confidence.round());
        prop_assert_eq!(signal.bullet_points.len(), 3);

        let expected = if signal.composite >= 0.2 {
            Action::Buy
        } else if signal.composite <= -0.2 {
            Action::Sell
        } else {
            Action::Hold
        };
        prop_assert_eq!(signal.action, expected);
    }
}

// ── 6. Convergence direction ─────────────────────────────────────────

fn assert_convergence_follows_histogram(signal: &Signal) -> Result<(), TestCaseError> {
    let histogram = signal.indicators.histogram;
    let convergence = signal.scores.convergence;
    let floor = signal.indicators.price.abs() * NEGLIGIBLE_RELATIVE_MAGNITUDE;
    if histogram.abs() > floor {
        prop_assert_eq!(
            convergence.signum(),
            histogram.signum(),
            "convergence {} opposes histogram {}",
            convergence,
            histogram
        );
    }
    Ok(())
}

proptest! {
    #[test]
    fn convergence_never_opposes_histogram(values in arb_prices(48, 200)) {
        let signal = generate_signal(&series(&values), &SignalConfig::default()).unwrap();
        assert_convergence_follows_histogram(&signal)?;
    }

    #[test]
    fn convergence_follows_histogram_on_oscillating_downtrend(
        n in 48usize..160,
        drift in 0.05..1.0_f64,
        amplitude in 1.0..10.0_f64,
        frequency in 0.1..0.5_f64,
    ) {
        // MACD sits below zero while the oscillation pushes it above its signal line.
        let values: Vec<f64> = (0..n)
            .map(|i| 300.0 - drift * i as f64 + amplitude * (frequency * i as f64).sin())
            .collect();
        let signal = generate_signal(&series(&values), &SignalConfig::default()).unwrap();
        assert_convergence_follows_histogram(&signal)?;
    }
}
