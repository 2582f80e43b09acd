//! Error types for rate conversion and contribution accumulation

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GrowthError>;

/// Failures reported by the numerical core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GrowthError {
    /// Input outside its documented domain (non-positive frequency,
    /// duration or period count, unknown frequency name)
    #[error("Invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        parameter: String,
        reason: String,
    },

    /// Fractional power of a negative base has no real value
    #[error("Undefined operation: {reason}")]
    UndefinedOperation { reason: String },
}

impl GrowthError {
    pub fn invalid(parameter: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            reason: reason.into(),
        }
    }

    /// Reject anything that is not a strictly positive finite number
    pub fn require_positive(parameter: &str, value: f64) -> Result<f64> {
        if value > 0.0 && value.is_finite() {
            Ok(value)
        } else {
            Err(Self::invalid(parameter, format!("must be positive and finite, got {}", value)))
        }
    }
}
