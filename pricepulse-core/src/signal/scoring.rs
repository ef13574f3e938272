//! Directional factor scores, each in [-1, +1], and their weighted composite.

use serde::{Deserialize, Serialize};

use super::config::Weights;

/// Magnitudes at or below `|price| * NEGLIGIBLE_RELATIVE_MAGNITUDE` read as zero.
///
/// Keeps floating-point residue (e.g. an EMA of a constant series drifting by
/// one ulp) from being normalized into a full-strength direction.
pub const NEGLIGIBLE_RELATIVE_MAGNITUDE: f64 = 1e-9;

/// Scores with an absolute value below this are described as neutral.
pub const NEUTRAL_BAND: f64 = 0.05;

/// The three contributing factors, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Trend,
    Momentum,
    Convergence,
}

impl Factor {
    pub const ALL: [Factor; 3] = [Factor::Trend, Factor::Momentum, Factor::Convergence];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Trend => "trend",
            Self::Momentum => "momentum",
            Self::Convergence => "convergence",
        }
    }
}

/// Per-factor directional reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorScores {
    pub trend: f64,
    pub momentum: f64,
    pub convergence: f64,
}

impl FactorScores {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Trend => self.trend,
            Factor::Momentum => self.momentum,
            Factor::Convergence => self.convergence,
        }
    }

    /// Weighted sum normalized by the total weight, so the result stays in [-1, 1].
    pub fn composite(&self, weights: &Weights) -> f64 {
        let total = weights.total();
        if total <= 0.0 {
            return 0.0;
        }
        Factor::ALL
            .iter()
            .map(|&f| self.contribution(f, weights))
            .sum::<f64>()
            .clamp(-1.0, 1.0)
    }

    /// Share of the composite attributable to `factor`.
    pub fn contribution(&self, factor: Factor, weights: &Weights) -> f64 {
        let total = weights.total();
        if total <= 0.0 {
            return 0.0;
        }
        let weight = match factor {
            Factor::Trend => weights.trend,
            Factor::Momentum => weights.momentum,
            Factor::Convergence => weights.convergence,
        };
        weight * self.get(factor) / total
    }

    /// Factor with the greatest absolute weighted contribution.
    ///
    /// Ties resolve in reporting order. Returns `None` when every contribution is zero.
    pub fn dominant(&self, weights: &Weights) -> Option<Factor> {
        let mut best: Option<(Factor, f64)> = None;
        for factor in Factor::ALL {
            let magnitude = self.contribution(factor, weights).abs();
            if magnitude == 0.0 {
                continue;
            }
            match best {
                Some((_, m)) if m >= magnitude => {}
                _ => best = Some((factor, magnitude)),
            }
        }
        best.map(|(factor, _)| factor)
    }
}

/// Trend read from the spread between short and long SMA.
///
/// `(short - long) / long`, scaled by `sensitivity` and clamped. A zero long
/// average carries no trend information and reads as 0.
pub fn trend_score(short_sma: f64, long_sma: f64, sensitivity: f64) -> f64 {
    if long_sma == 0.0 {
        return 0.0;
    }
    ((short_sma - long_sma) / long_sma * sensitivity).clamp(-1.0, 1.0)
}

/// Momentum read from RSI, contrarian around the oversold/overbought band.
///
/// `oversold` maps to +1, `overbought` to -1, their midpoint to 0, linear in
/// between and clamped outside.
pub fn momentum_score(rsi: f64, oversold: f64, overbought: f64) -> f64 {
    let mid = (oversold + overbought) / 2.0;
    let half_width = (overbought - oversold) / 2.0;
    if half_width <= 0.0 {
        return 0.0;
    }
    ((mid - rsi) / half_width).clamp(-1.0, 1.0)
}

/// Convergence read from MACD.
///
/// `recent_histogram` and `recent_macd` are the most recent defined values,
/// oldest first. The crossover read is the latest histogram value relative to
/// the largest recent histogram magnitude, so its sign is the sign of
/// `macd - signal`. Only when the two lines coincide (a negligible histogram)
/// does the zero-line read decide: the latest MACD value relative to its
/// recent magnitude.
pub fn convergence_score(recent_histogram: &[f64], recent_macd: &[f64], price: f64) -> f64 {
    let floor = price.abs() * NEGLIGIBLE_RELATIVE_MAGNITUDE;
    let crossover = normalized_latest(recent_histogram, floor);
    if crossover != 0.0 {
        return crossover;
    }
    normalized_latest(recent_macd, floor)
}

/// Latest value divided by the largest magnitude in `recent`.
fn normalized_latest(recent: &[f64], floor: f64) -> f64 {
    let Some(&latest) = recent.last() else {
        return 0.0;
    };
    let scale = recent.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if scale <= floor || latest.abs() <= floor {
        return 0.0;
    }
    (latest / scale).clamp(-1.0, 1.0)
}

/// True when the value's magnitude is below the neutral band.
pub fn is_neutral(score: f64) -> bool {
    score.abs() < NEUTRAL_BAND
}
