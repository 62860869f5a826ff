//! Premium verification
//!
//! Provides:
//! - [`SystemParameters`]: tier adjustment plus model constants
//! - [`BoundsModel`]: pluggable bound derivation
//! - [`verify_submitted_premium`]: accept/reject a submitted premium

pub mod bounds;
pub mod verifier;

pub use bounds::{BoundsModel, ProportionalBoundsModel, SystemParameters, DEFAULT_TIME_VALUE_BPS};
pub use verifier::{verify_submitted_premium, verify_with_model, PremiumVerdict};
