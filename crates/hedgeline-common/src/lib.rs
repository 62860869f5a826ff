//! # Hedgeline Common
//!
//! Shared types, errors, and fixed-point arithmetic for the Hedgeline
//! protection-policy platform.
//!
//! ## Core Types
//!
//! - [`ScaledAmount`]: decimal quantity as an integer multiple of 10^-8
//! - [`OptionType`]: `PUT` or `CALL`
//! - [`RiskTier`]: role-scoped tier (buyer or provider table)
//! - [`PolicyRequest`]/[`PolicyTerms`]: creation request and frozen terms
//! - [`SettlementResult`]: payout computed at expiration
//!
//! ## Arithmetic
//!
//! - [`fixed_point::mul_down`] / [`fixed_point::div_down`]: truncating,
//!   overflow-checked scaled multiply and divide

pub mod error;
pub mod fixed_point;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{
    ArithmeticError, BoundsRejection, CollaboratorError, ErrorKind, HedgelineError,
    LifecycleError, LiquidityError, Result, ValidationError,
};
pub use fixed_point::{ScaledAmount, SCALE, SCALE_DECIMALS};
pub use types::{
    option::{ExpirationMarker, OptionType},
    policy::{
        PolicyId, PolicyRequest, PolicyTerms, PremiumBounds, SettlementOutcome, SettlementResult,
    },
    tier::{BuyerTier, ProviderTier, RiskAdjustment, RiskTier, Role},
};

/// Hedgeline version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
