//! Premium bound derivation
//!
//! The proportional model prices a policy as its intrinsic value plus a flat
//! share of the notional value, then widens that into a range with the tier's
//! factors. All steps use truncating fixed-point arithmetic.

use hedgeline_common::{
    fixed_point::{apply_bps, mul_down},
    OptionType, PremiumBounds, Result, RiskAdjustment, RiskTier, ScaledAmount, ValidationError,
};
use serde::{Deserialize, Serialize};

/// Default time value, as a share of notional value (3%)
pub const DEFAULT_TIME_VALUE_BPS: u32 = 300;

/// Inputs to bound derivation that come from configuration and the
/// parameter store rather than from the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemParameters {
    /// Time value as basis points of `spot × amount`
    pub time_value_bps: u32,
    /// Tier-specific adjustment and range factors
    pub adjustment: RiskAdjustment,
}

impl SystemParameters {
    pub fn new(time_value_bps: u32, adjustment: RiskAdjustment) -> Self {
        Self {
            time_value_bps,
            adjustment,
        }
    }

    /// Default model constants with the built-in table entry for `tier`
    pub fn default_for(tier: RiskTier) -> Self {
        Self::new(DEFAULT_TIME_VALUE_BPS, RiskAdjustment::default_for(tier))
    }
}

/// Derives the acceptable premium range for a policy
pub trait BoundsModel: Send + Sync {
    fn bounds(
        &self,
        option_type: OptionType,
        protected_value: ScaledAmount,
        protection_amount: ScaledAmount,
        current_price: ScaledAmount,
        risk_tier: RiskTier,
        params: &SystemParameters,
    ) -> Result<PremiumBounds>;
}

/// Intrinsic value plus a proportional time value
#[derive(Debug, Clone, Copy, Default)]
pub struct ProportionalBoundsModel;

impl ProportionalBoundsModel {
    /// Unadjusted premium estimate
    pub fn baseline(
        option_type: OptionType,
        protected_value: ScaledAmount,
        protection_amount: ScaledAmount,
        current_price: ScaledAmount,
        time_value_bps: u32,
    ) -> Result<ScaledAmount> {
        let intrinsic_per_unit = option_type.intrinsic(protected_value, current_price);
        let intrinsic = mul_down(intrinsic_per_unit, protection_amount)?;

        let notional_value = mul_down(current_price, protection_amount)?;
        let time_value = apply_bps(notional_value, time_value_bps)?;

        Ok(intrinsic.checked_add(time_value)?)
    }
}

impl BoundsModel for ProportionalBoundsModel {
    fn bounds(
        &self,
        option_type: OptionType,
        protected_value: ScaledAmount,
        protection_amount: ScaledAmount,
        current_price: ScaledAmount,
        risk_tier: RiskTier,
        params: &SystemParameters,
    ) -> Result<PremiumBounds> {
        let adjustment = &params.adjustment;
        if adjustment.tier != risk_tier {
            return Err(ValidationError::TierMismatch {
                expected: risk_tier.to_string(),
                actual: adjustment.tier.to_string(),
            }
            .into());
        }
        adjustment.validate()?;

        let baseline = Self::baseline(
            option_type,
            protected_value,
            protection_amount,
            current_price,
            params.time_value_bps,
        )?;
        let adjusted = apply_bps(baseline, adjustment.premium_adjustment_bps)?;

        Ok(PremiumBounds {
            min: mul_down(adjusted, adjustment.min_factor)?,
            max: mul_down(adjusted, adjustment.max_factor)?,
        })
    }
}
