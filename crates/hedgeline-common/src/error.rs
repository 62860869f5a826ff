//! Error types for Hedgeline
//!
//! One unified error type with a domain enum per failure class. Every variant
//! maps onto an [`ErrorKind`] so callers can tell business outcomes (bounds
//! rejection, insufficient liquidity) from faults, and faults that may be
//! retried (collaborator outages) from those that must not.

use crate::fixed_point::ScaledAmount;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using HedgelineError
pub type Result<T> = std::result::Result<T, HedgelineError>;

/// Unified error type for Hedgeline operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HedgelineError {
    // Bad enum or shape, never retried
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // Overflow or division by zero, fatal for the request
    #[error("Arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),

    // Premium outside the re-derived range
    #[error("Premium rejected: {0}")]
    Bounds(#[from] BoundsRejection),

    // Oracle, parameter store or vault failure
    #[error("Collaborator unavailable: {0}")]
    Collaborator(#[from] CollaboratorError),

    // Vault could not back the policy
    #[error("Liquidity error: {0}")]
    Liquidity(#[from] LiquidityError),

    // Lifecycle state machine violations
    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Arithmetic,
    BoundsRejection,
    CollaboratorUnavailable,
    InsufficientLiquidity,
    Lifecycle,
    Internal,
}

impl HedgelineError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            HedgelineError::Validation(_) => ErrorKind::Validation,
            HedgelineError::Arithmetic(_) => ErrorKind::Arithmetic,
            HedgelineError::Bounds(_) => ErrorKind::BoundsRejection,
            HedgelineError::Collaborator(_) => ErrorKind::CollaboratorUnavailable,
            HedgelineError::Liquidity(LiquidityError::InsufficientLiquidity { .. }) => {
                ErrorKind::InsufficientLiquidity
            }
            HedgelineError::Liquidity(_) => ErrorKind::Internal,
            HedgelineError::Lifecycle(_) => ErrorKind::Lifecycle,
            HedgelineError::Config(_)
            | HedgelineError::Serialization(_)
            | HedgelineError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Whether the caller may retry the same request with backoff.
    ///
    /// Only collaborator outages qualify; the orchestrator itself never retries.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::CollaboratorUnavailable
    }

    /// Whether this is a normal business outcome rather than a system fault
    pub fn is_business_outcome(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::BoundsRejection | ErrorKind::InsufficientLiquidity
        )
    }
}

/// Input shape and enumeration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid option type: {0:?} (expected \"PUT\" or \"CALL\")")]
    InvalidOptionType(String),

    #[error("Unknown {role} risk tier: {tier:?}")]
    UnknownTier { role: String, tier: String },

    #[error("Risk adjustment issued for {actual}, policy requested {expected}")]
    TierMismatch { expected: String, actual: String },

    #[error("Invalid system parameters: {0}")]
    InvalidParameters(String),

    #[error("Scale mismatch: request uses {actual} decimals, expected {expected}")]
    ScaleMismatch { expected: u32, actual: u32 },

    #[error("Amount must be non-zero: {field}")]
    ZeroAmount { field: &'static str },

    #[error("Amount must not be negative: {0}")]
    NegativeAmount(String),

    #[error("Value {0} has more precision than the canonical scale allows")]
    PrecisionLoss(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

/// Fixed-point arithmetic errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Division by zero")]
    DivisionByZero,
}

/// Submitted premium rejected against re-derived bounds
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BoundsRejection {
    #[error("Premium {submitted} outside bounds [{min}, {max}]")]
    PremiumOutOfBounds {
        min: ScaledAmount,
        max: ScaledAmount,
        submitted: ScaledAmount,
    },
}

/// External collaborator failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    #[error("Price unavailable for {asset}: {reason}")]
    PriceUnavailable { asset: String, reason: String },

    #[error("Parameters unavailable: {0}")]
    ParametersUnavailable(String),

    #[error("Vault unavailable: {0}")]
    VaultUnavailable(String),

    #[error("{collaborator} did not respond within {timeout_ms}ms")]
    Timeout {
        collaborator: &'static str,
        timeout_ms: u64,
    },
}

/// Collateral vault errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiquidityError {
    #[error("Insufficient liquidity: required {required}, available {available}")]
    InsufficientLiquidity {
        required: ScaledAmount,
        available: ScaledAmount,
    },

    #[error("Unknown reservation: {0}")]
    UnknownReservation(String),
}

/// Policy state machine errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("Policy not found: {0}")]
    PolicyNotFound(String),

    #[error("Policy already exists: {0}")]
    DuplicatePolicy(String),

    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Policy expires at {expiration}, current marker is {now}")]
    NotExpired { expiration: u64, now: u64 },
}

impl From<serde_json::Error> for HedgelineError {
    fn from(err: serde_json::Error) -> Self {
        HedgelineError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for HedgelineError {
    fn from(err: anyhow::Error) -> Self {
        HedgelineError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HedgelineError::Validation(ValidationError::InvalidOptionType("STRADDLE".into()));
        assert!(err.to_string().contains("STRADDLE"));
    }

    #[test]
    fn test_bounds_rejection_reports_range() {
        let err = BoundsRejection::PremiumOutOfBounds {
            min: ScaledAmount::from_raw(100_000_000),
            max: ScaledAmount::from_raw(300_000_000),
            submitted: ScaledAmount::from_raw(50_000_000),
        };
        let text = err.to_string();
        assert!(text.contains("0.50000000"));
        assert!(text.contains("[1.00000000, 3.00000000]"));
    }

    #[test]
    fn test_only_collaborator_errors_are_retryable() {
        let timeout: HedgelineError = CollaboratorError::Timeout {
            collaborator: "oracle",
            timeout_ms: 500,
        }
        .into();
        assert!(timeout.is_retryable());

        let overflow: HedgelineError = ArithmeticError::Overflow.into();
        assert!(!overflow.is_retryable());
        assert_eq!(overflow.kind(), ErrorKind::Arithmetic);

        let liquidity: HedgelineError = LiquidityError::InsufficientLiquidity {
            required: ScaledAmount::ONE,
            available: ScaledAmount::ZERO,
        }
        .into();
        assert!(!liquidity.is_retryable());
        assert!(liquidity.is_business_outcome());
    }
}
