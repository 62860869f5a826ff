//! # Hedgeline Engine
//!
//! The two pure computations the settlement authority trusts:
//!
//! - **Verification**: re-derive an acceptable premium range from the oracle
//!   price and tier parameters, then accept or reject an off-chain quote.
//! - **Settlement**: compute the payout owed at expiration.
//!
//! ## Baseline Premium (MVP)
//!
//! ```text
//! baseline = intrinsic(strike, spot) × amount + spot × amount × time_value_bps
//! adjusted = baseline × tier_adjustment_bps
//! bounds   = [adjusted × min_factor, adjusted × max_factor]
//! ```
//!
//! This is a coarse sanity check, not a pricing model. It sits behind
//! [`BoundsModel`] so a stricter model can replace it without changing the
//! verification contract.

pub mod settlement;
pub mod verification;

pub use settlement::calculate_settlement;
pub use verification::{
    verify_submitted_premium, verify_with_model, BoundsModel, PremiumVerdict,
    ProportionalBoundsModel, SystemParameters, DEFAULT_TIME_VALUE_BPS,
};
