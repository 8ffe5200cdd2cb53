//! Error types shared by the fleet model and the cycle scheduler.

use thiserror::Error;

use crate::mission::MissionState;

/// Raised when an attribute is set to an out-of-domain value, or when a handle
/// does not resolve inside the environment it is used with.
///
/// A failed setter never mutates the attribute it was asked to change.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("{field} must be greater than zero (got {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("assigned vehicle is not registered in this environment")]
    UnregisteredVehicle,
    #[error("no vehicle with id `{0}` is registered")]
    UnknownVehicleId(String),
    #[error("mission is not registered in this environment")]
    UnknownMission,
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("mission cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        from: MissionState,
        to: MissionState,
    },
    #[error("invalid scenario description: {0}")]
    Scenario(#[from] serde_json::Error),
}

pub(crate) fn require_non_empty(
    field: &'static str,
    value: String,
) -> Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(value)
}

/// NaN is rejected along with zero and negative values.
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NonPositive { field, value })
    }
}
