//! Error taxonomy for the analysis engine.
//!
//! Only two things can go wrong: the caller passed a malformed argument
//! (a bug on their side, not retryable), or the series is valid but too short
//! for the configured windows. Undefined indicator slots are values, not errors.

use thiserror::Error;

/// Errors raised by series construction, indicator construction, and signal synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("insufficient history: need at least {required} points, got {available}")]
    InsufficientHistory { required: usize, available: usize },
}

impl AnalysisError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// True when the caller could retry with a longer (or substituted) series.
    pub fn is_insufficient_history(&self) -> bool {
        matches!(self, Self::InsufficientHistory { .. })
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_history_message_names_both_lengths() {
        let err = AnalysisError::InsufficientHistory {
            required: 48,
            available: 5,
        };
        assert_eq!(
            err.to_string(),
            "insufficient history: need at least 48 points, got 5"
        );
        assert!(err.is_insufficient_history());
    }

    #[test]
    fn invalid_argument_is_not_retryable() {
        let err = AnalysisError::invalid("window must be >= 1");
        assert_eq!(err.to_string(), "invalid argument: window must be >= 1");
        assert!(!err.is_insufficient_history());
    }
}
