//! Human-readable rationale: one summary sentence plus one bullet per factor.

use super::config::SignalConfig;
use super::scoring::{is_neutral, Factor, FactorScores, NEGLIGIBLE_RELATIVE_MAGNITUDE};
use super::{Action, IndicatorSnapshot};

fn lean(score: f64) -> &'static str {
    if is_neutral(score) {
        "neutral"
    } else if score > 0.0 {
        "bullish"
    } else {
        "bearish"
    }
}

/// "above" / "below" / "level with", treating negligible gaps as level.
fn relation(a: f64, b: f64, price: f64) -> &'static str {
    let diff = a - b;
    if diff.abs() <= price.abs() * NEGLIGIBLE_RELATIVE_MAGNITUDE {
        "level with"
    } else if diff > 0.0 {
        "above"
    } else {
        "below"
    }
}

/// One sentence naming the action and the factor that moved it most.
pub fn summary(
    action: Action,
    confidence: f64,
    scores: &FactorScores,
    snapshot: &IndicatorSnapshot,
    config: &SignalConfig,
) -> String {
    match scores.dominant(&config.weights) {
        Some(factor) => format!(
            "{action} with {confidence:.0}% confidence, driven mainly by {}.",
            factor_phrase(factor, scores, snapshot, config)
        ),
        None => format!(
            "{action} with {confidence:.0}% confidence; no factor shows a directional bias."
        ),
    }
}

fn factor_phrase(
    factor: Factor,
    scores: &FactorScores,
    snapshot: &IndicatorSnapshot,
    config: &SignalConfig,
) -> String {
    let score = scores.get(factor);
    match factor {
        Factor::Trend => format!(
            "the {} trend, with the short average {} the long average",
            lean(score),
            relation(snapshot.sma_short, snapshot.sma_long, snapshot.price)
        ),
        Factor::Momentum => format!(
            "{} momentum, with RSI at {:.1} ({})",
            lean(score),
            snapshot.rsi,
            RsiZone::of(snapshot.rsi, config).label()
        ),
        Factor::Convergence => format!(
            "{} MACD convergence, with the MACD line {} its signal line",
            lean(score),
            relation(snapshot.macd_line, snapshot.macd_signal, snapshot.price)
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiZone {
    fn of(rsi: f64, config: &SignalConfig) -> Self {
        if rsi >= config.rsi_overbought {
            Self::Overbought
        } else if rsi <= config.rsi_oversold {
            Self::Oversold
        } else {
            Self::Neutral
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Overbought => "overbought",
            Self::Oversold => "oversold",
            Self::Neutral => "neutral range",
        }
    }
}

/// Trend, momentum, convergence lines, in that order.
pub fn bullet_points(
    scores: &FactorScores,
    snapshot: &IndicatorSnapshot,
    config: &SignalConfig,
) -> Vec<String> {
    vec![
        trend_line(scores.trend, snapshot, config),
        momentum_line(scores.momentum, snapshot, config),
        convergence_line(scores.convergence, snapshot),
    ]
}

fn trend_line(score: f64, s: &IndicatorSnapshot, config: &SignalConfig) -> String {
    if s.sma_long == 0.0 {
        return format!(
            "Trend: the {}-point average is zero, so there is no trend read ({}, score {score:+.2}).",
            config.long_window,
            lean(score)
        );
    }
    let spread_pct = (s.sma_short - s.sma_long) / s.sma_long * 100.0;
    format!(
        "Trend: the {}-point average ({:.2}) is {} the {}-point average ({:.2}) by {:.2}% ({}, score {score:+.2}).",
        config.short_window,
        s.sma_short,
        relation(s.sma_short, s.sma_long, s.price),
        config.long_window,
        s.sma_long,
        spread_pct.abs(),
        lean(score)
    )
}

fn momentum_line(score: f64, s: &IndicatorSnapshot, config: &SignalConfig) -> String {
    let reading = match RsiZone::of(s.rsi, config) {
        RsiZone::Overbought => "is overbought, pointing to a bearish reversal bias".to_string(),
        RsiZone::Oversold => "is oversold, pointing to a bullish reversal bias".to_string(),
        RsiZone::Neutral => format!(
            "sits between {:.0} and {:.0}",
            config.rsi_oversold, config.rsi_overbought
        ),
    };
    format!(
        "Momentum: RSI({}) at {:.1} {reading} ({}, score {score:+.2}).",
        config.rsi_period,
        s.rsi,
        lean(score)
    )
}

fn convergence_line(score: f64, s: &IndicatorSnapshot) -> String {
    format!(
        "Convergence: the MACD line ({:.4}) is {} its signal line ({:.4}), histogram {:+.4} ({}, score {score:+.2}).",
        s.macd_line,
        relation(s.macd_line, s.macd_signal, s.price),
        s.macd_signal,
        s.histogram,
        lean(score)
    )
}
