//! Quote preparation
//!
//! Validates user inputs, resolves the risk tier, prices a candidate premium
//! and emits a scaled [`PolicyRequest`].

use crate::config::QuoteConfig;
use crate::pricing;
use crate::tier::resolve_tier;
use hedgeline_common::{
    fixed_point::BPS_DENOMINATOR, ArithmeticError, ExpirationMarker, OptionType, PolicyRequest,
    Result, RiskAdjustment, RiskTier, Role, ScaledAmount, ValidationError, SCALE_DECIMALS,
};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// User-facing quote inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteInput {
    pub role: Role,
    /// `PUT` or `CALL`
    pub option_type: String,
    pub asset: String,
    pub counterparty: String,
    pub spot_price: Decimal,
    /// Strike
    pub protected_value: Decimal,
    /// Quantity of the underlying
    pub protection_amount: Decimal,
    pub days_to_expiry: u32,
    pub expiration: ExpirationMarker,
    /// Annualized; falls back to the configured default
    #[serde(default)]
    pub volatility: Option<f64>,
    /// Required for providers, derived for buyers when absent
    #[serde(default)]
    pub risk_tier: Option<String>,
}

/// A request ready for the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedQuote {
    pub request: PolicyRequest,
    /// Candidate premium, truncated to the canonical scale
    pub premium: Decimal,
    pub tier: RiskTier,
    pub tier_derived: bool,
}

/// Builds policy requests from quote inputs
#[derive(Debug, Clone, Default)]
pub struct QuotePreparer {
    config: QuoteConfig,
}

impl QuotePreparer {
    pub fn new(config: QuoteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// Prepare a policy request with a candidate premium
    #[instrument(skip(self, input), fields(asset = %input.asset, role = %input.role))]
    pub fn prepare(&self, input: &QuoteInput) -> Result<PreparedQuote> {
        let option_type: OptionType = input.option_type.parse()?;
        let protected_value = ScaledAmount::from_decimal(input.protected_value)?;
        let protection_amount = ScaledAmount::from_decimal(input.protection_amount)?;

        let (tier, tier_derived) = resolve_tier(
            input.role,
            option_type,
            input.protected_value,
            input.spot_price,
            input.risk_tier.as_deref(),
        )?;
        let adjustment = RiskAdjustment::default_for(tier);

        let premium = self.candidate_premium(option_type, input, &adjustment)?;
        let submitted_premium = ScaledAmount::from_decimal(premium)?;
        if submitted_premium.is_zero() {
            return Err(ValidationError::ZeroAmount { field: "premium" }.into());
        }

        let request = PolicyRequest {
            option_type,
            protected_value,
            protection_amount,
            risk_tier: tier,
            submitted_premium,
            asset: input.asset.clone(),
            counterparty: input.counterparty.clone(),
            expiration: input.expiration,
            scale_decimals: SCALE_DECIMALS,
        };
        request.validate()?;

        debug!(%tier, tier_derived, %premium, "Quote prepared");

        Ok(PreparedQuote {
            request,
            premium,
            tier,
            tier_derived,
        })
    }

    /// Black–Scholes value × amount × tier adjustment, truncated to scale
    fn candidate_premium(
        &self,
        option_type: OptionType,
        input: &QuoteInput,
        adjustment: &RiskAdjustment,
    ) -> Result<Decimal> {
        let spot = to_f64(input.spot_price, "spot_price")?;
        let strike = to_f64(input.protected_value, "protected_value")?;
        let vol = input.volatility.unwrap_or(self.config.default_volatility);
        let time = input.days_to_expiry as f64 / self.config.days_per_year;

        let per_unit = pricing::price(
            option_type,
            spot,
            strike,
            self.config.risk_free_rate,
            vol,
            time,
        )?;
        let per_unit = Decimal::from_f64(per_unit).ok_or_else(|| {
            ValidationError::InvalidParameters(format!("unrepresentable premium {}", per_unit))
        })?;

        let bps = Decimal::from(adjustment.premium_adjustment_bps);
        let denominator = Decimal::from(BPS_DENOMINATOR as u64);
        let premium = per_unit
            .checked_mul(input.protection_amount)
            .and_then(|total| total.checked_mul(bps))
            .and_then(|total| total.checked_div(denominator))
            .ok_or(ArithmeticError::Overflow)?;

        Ok(premium.round_dp_with_strategy(SCALE_DECIMALS, RoundingStrategy::ToZero))
    }
}

fn to_f64(value: Decimal, field: &str) -> Result<f64> {
    value.to_f64().ok_or_else(|| {
        ValidationError::InvalidParameters(format!("{} out of range: {}", field, value)).into()
    })
}
