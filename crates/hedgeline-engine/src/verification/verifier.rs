//! Submitted premium verification
//!
//! The premium arrives from an untrusted quoting layer. Bounds are derived
//! from scratch on every call from the current oracle price and the tier's
//! parameters; nothing is cached between calls.

use super::bounds::{BoundsModel, ProportionalBoundsModel, SystemParameters};
use hedgeline_common::{
    BoundsRejection, OptionType, PremiumBounds, Result, RiskTier, ScaledAmount,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of premium verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PremiumVerdict {
    Accept { bounds: PremiumBounds },
    Reject(BoundsRejection),
}

impl PremiumVerdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, PremiumVerdict::Accept { .. })
    }

    /// Bounds computed for this verdict, whichever way it went
    pub fn bounds(&self) -> PremiumBounds {
        match self {
            PremiumVerdict::Accept { bounds } => *bounds,
            PremiumVerdict::Reject(BoundsRejection::PremiumOutOfBounds { min, max, .. }) => {
                PremiumBounds {
                    min: *min,
                    max: *max,
                }
            }
        }
    }

    /// Turn a rejection into an error
    pub fn into_result(self) -> Result<PremiumBounds> {
        match self {
            PremiumVerdict::Accept { bounds } => Ok(bounds),
            PremiumVerdict::Reject(rejection) => Err(rejection.into()),
        }
    }
}

/// Verify a premium with the default proportional model
pub fn verify_submitted_premium(
    submitted_premium: ScaledAmount,
    option_type: OptionType,
    protected_value: ScaledAmount,
    protection_amount: ScaledAmount,
    current_price: ScaledAmount,
    risk_tier: RiskTier,
    params: &SystemParameters,
) -> Result<PremiumVerdict> {
    verify_with_model(
        &ProportionalBoundsModel,
        submitted_premium,
        option_type,
        protected_value,
        protection_amount,
        current_price,
        risk_tier,
        params,
    )
}

/// Verify a premium against bounds from `model`
#[allow(clippy::too_many_arguments)]
pub fn verify_with_model(
    model: &dyn BoundsModel,
    submitted_premium: ScaledAmount,
    option_type: OptionType,
    protected_value: ScaledAmount,
    protection_amount: ScaledAmount,
    current_price: ScaledAmount,
    risk_tier: RiskTier,
    params: &SystemParameters,
) -> Result<PremiumVerdict> {
    let bounds = model.bounds(
        option_type,
        protected_value,
        protection_amount,
        current_price,
        risk_tier,
        params,
    )?;

    if bounds.contains(submitted_premium) {
        return Ok(PremiumVerdict::Accept { bounds });
    }

    debug!(
        %submitted_premium,
        min = %bounds.min,
        max = %bounds.max,
        tier = %risk_tier,
        "Premium outside derived bounds"
    );

    Ok(PremiumVerdict::Reject(BoundsRejection::PremiumOutOfBounds {
        min: bounds.min,
        max: bounds.max,
        submitted: submitted_premium,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hedgeline_common::{BuyerTier, HedgelineError, ProviderTier, RiskAdjustment};
    use proptest::prelude::*;

    fn units(n: u64) -> ScaledAmount {
        ScaledAmount::from_units(n).unwrap()
    }

    fn standard() -> (RiskTier, SystemParameters) {
        let tier = RiskTier::Buyer(BuyerTier::Standard);
        (tier, SystemParameters::default_for(tier))
    }

    fn verify(premium: ScaledAmount) -> PremiumVerdict {
        let (tier, params) = standard();
        verify_submitted_premium(
            premium,
            OptionType::Put,
            units(50_000),
            ScaledAmount::ONE,
            units(50_000),
            tier,
            &params,
        )
        .unwrap()
    }

    #[test]
    fn test_premium_inside_bounds_accepted() {
        let verdict = verify(units(1_500));
        assert!(verdict.is_accept());
        assert_eq!(verdict.bounds().min, units(1_050));
        assert_eq!(verdict.bounds().max, units(2_400));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(verify(units(1_050)).is_accept());
        assert!(verify(units(2_400)).is_accept());
    }

    #[test]
    fn test_premium_below_min_rejected() {
        let verdict = verify(units(100));
        assert_eq!(
            verdict,
            PremiumVerdict::Reject(BoundsRejection::PremiumOutOfBounds {
                min: units(1_050),
                max: units(2_400),
                submitted: units(100),
            })
        );
        assert!(matches!(
            verdict.into_result(),
            Err(HedgelineError::Bounds(_))
        ));
    }

    #[test]
    fn test_premium_above_max_rejected() {
        assert!(!verify(units(2_401)).is_accept());
    }

    #[test]
    fn test_rejection_survives_json() {
        let verdict = verify(units(100));
        let json = serde_json::to_string(&verdict).unwrap();
        let decoded: PremiumVerdict = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, verdict);
        assert_eq!(decoded.bounds().min, units(1_050));
    }

    #[test]
    fn test_tier_adjustment_shifts_bounds() {
        let tier = RiskTier::Provider(ProviderTier::Conservative);
        let verdict = verify_submitted_premium(
            units(1_500),
            OptionType::Call,
            units(50_000),
            ScaledAmount::ONE,
            units(50_000),
            tier,
            &SystemParameters::default_for(tier),
        )
        .unwrap();
        // 1500 × 1.05 = 1575; range [1260, 2362.5]
        assert_eq!(verdict.bounds().min, units(1_260));
        assert_eq!(verdict.bounds().max, ScaledAmount::from_raw(236_250_000_000));
    }

    #[test]
    fn test_configurable_time_value() {
        let tier = RiskTier::Buyer(BuyerTier::Standard);
        let params = SystemParameters::new(0, RiskAdjustment::default_for(tier));
        let verdict = verify_submitted_premium(
            ScaledAmount::ZERO,
            OptionType::Call,
            units(50_000),
            ScaledAmount::ONE,
            units(40_000),
            tier,
            &params,
        )
        .unwrap();
        // OTM call with no time value: only a zero premium passes
        assert!(verdict.is_accept());
        assert_eq!(verdict.bounds().max, ScaledAmount::ZERO);
    }

    struct FixedBounds(PremiumBounds);

    impl BoundsModel for FixedBounds {
        fn bounds(
            &self,
            _option_type: OptionType,
            _protected_value: ScaledAmount,
            _protection_amount: ScaledAmount,
            _current_price: ScaledAmount,
            _risk_tier: RiskTier,
            _params: &SystemParameters,
        ) -> Result<PremiumBounds> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_alternative_model_keeps_contract() {
        let (tier, params) = standard();
        let model = FixedBounds(PremiumBounds {
            min: units(10),
            max: units(20),
        });
        let verdict = verify_with_model(
            &model,
            units(15),
            OptionType::Put,
            units(50_000),
            ScaledAmount::ONE,
            units(50_000),
            tier,
            &params,
        )
        .unwrap();
        assert!(verdict.is_accept());
    }

    proptest! {
        #[test]
        fn prop_verification_is_pure(
            premium in 0u64..10_000,
            strike in 1u64..100_000,
            spot in 1u64..100_000,
            amount in 1u64..1_000,
            is_put in any::<bool>(),
        ) {
            let (tier, params) = standard();
            let option_type = if is_put { OptionType::Put } else { OptionType::Call };
            let run = || verify_submitted_premium(
                units(premium),
                option_type,
                units(strike),
                units(amount),
                units(spot),
                tier,
                &params,
            ).unwrap();
            prop_assert_eq!(run(), run());
        }
    }
}
