//! Risk tier resolution
//!
//! Buyers may leave the tier to be derived from the protected ratio: how
//! close the strike sits to spot on the protected side. Providers must always
//! name their tier.
//!
//! | ratio      | buyer tier        |
//! |------------|-------------------|
//! | `>= 0.95`  | `conservative`    |
//! | `>= 0.85`  | `standard`        |
//! | `>= 0.70`  | `flexible`        |
//! | below      | `crash_insurance` |

use hedgeline_common::{
    ArithmeticError, BuyerTier, OptionType, Result, RiskTier, Role, ValidationError,
};
use rust_decimal::Decimal;

/// `strike / spot` for puts, `spot / strike` for calls
pub fn protected_ratio(option_type: OptionType, strike: Decimal, spot: Decimal) -> Result<Decimal> {
    if strike <= Decimal::ZERO {
        return Err(ValidationError::ZeroAmount {
            field: "protected_value",
        }
        .into());
    }
    if spot <= Decimal::ZERO {
        return Err(ValidationError::ZeroAmount { field: "spot_price" }.into());
    }

    let (numerator, denominator) = match option_type {
        OptionType::Put => (strike, spot),
        OptionType::Call => (spot, strike),
    };
    numerator
        .checked_div(denominator)
        .ok_or_else(|| ArithmeticError::DivisionByZero.into())
}

/// Buyer tier for a protected ratio
pub fn derive_buyer_tier(option_type: OptionType, strike: Decimal, spot: Decimal) -> Result<BuyerTier> {
    let ratio = protected_ratio(option_type, strike, spot)?;

    let tier = if ratio >= Decimal::new(95, 2) {
        BuyerTier::Conservative
    } else if ratio >= Decimal::new(85, 2) {
        BuyerTier::Standard
    } else if ratio >= Decimal::new(70, 2) {
        BuyerTier::Flexible
    } else {
        BuyerTier::CrashInsurance
    };
    Ok(tier)
}

/// Resolve the tier for a quote
///
/// Returns the tier and whether it was derived rather than given.
pub fn resolve_tier(
    role: Role,
    option_type: OptionType,
    strike: Decimal,
    spot: Decimal,
    explicit: Option<&str>,
) -> Result<(RiskTier, bool)> {
    match (explicit, role) {
        (Some(name), _) => Ok((RiskTier::parse(role, name)?, false)),
        (None, Role::Buyer) => Ok((
            RiskTier::Buyer(derive_buyer_tier(option_type, strike, spot)?),
            true,
        )),
        (None, Role::Provider) => Err(ValidationError::MissingField("risk_tier").into()),
    }
}
