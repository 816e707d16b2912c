//! Error types for the routing engine

use thiserror::Error;

use crate::types::Tier;

/// Routing errors.
///
/// Request content never produces an error. Every variant here describes a
/// configuration defect, which the host must treat as non-retryable.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RoutingError {
    #[error("misconfiguration: no resource configured for tier {0}")]
    MissingResource(Tier),

    #[error("misconfiguration: resource id for tier {0} is empty")]
    EmptyResource(Tier),

    #[error("misconfiguration: empty keyword in `{category}` table")]
    EmptyKeyword { category: &'static str },

    #[error("misconfiguration: invalid keyword `{term}` in `{category}` table: {reason}")]
    InvalidKeyword {
        category: &'static str,
        term: String,
        reason: String,
    },

    #[error("misconfiguration: hard-override term `{0}` is not listed in the risk table")]
    HardOverrideNotRisk(String),

    #[error("misconfiguration: weight `{name}` must be finite and non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("misconfiguration: tier boundaries must satisfy 0 <= low_medium < medium_high <= 1, got {low_medium} and {medium_high}")]
    InvalidBoundaries { low_medium: f64, medium_high: f64 },

    #[error("misconfiguration: short_max_words ({short_max}) must be below long_min_words ({long_min})")]
    InvalidLengthThresholds { short_max: usize, long_min: usize },

    #[error("misconfiguration: escalation thresholds must be positive and strictly ascending, got {0:?}")]
    InvalidEscalationThresholds(Vec<u32>),

    #[error("misconfiguration: confidence `{name}` must lie in [0, 1], got {value}")]
    InvalidConfidence { name: &'static str, value: f64 },
}

impl RoutingError {
    /// Every routing error is a configuration defect; retrying the same call
    /// cannot succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Result type for routing operations
pub type RoutingResult<T> = Result<T, RoutingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RoutingError::MissingResource(Tier::High);
        assert_eq!(
            err.to_string(),
            "misconfiguration: no resource configured for tier HIGH"
        );
    }

    #[test]
    fn test_errors_are_not_retryable() {
        let err = RoutingError::InvalidEscalationThresholds(vec![3, 1]);
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("[3, 1]"));
    }
}
