//! Policy terms, creation requests and settlement results

use crate::error::ValidationError;
use crate::fixed_point::{ScaledAmount, SCALE_DECIMALS};
use crate::types::option::{ExpirationMarker, OptionType};
use crate::types::tier::RiskTier;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Policy identifier (UUID v7, time ordered)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(Uuid);

impl PolicyId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PolicyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request handed from the quote preparation layer to the orchestrator
///
/// `scale_decimals` states the scale the sender used for every financial
/// field. The orchestrator refuses anything other than [`SCALE_DECIMALS`]
/// instead of renormalizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRequest {
    pub option_type: OptionType,
    /// Strike (scaled)
    pub protected_value: ScaledAmount,
    /// Notional quantity of the underlying (scaled)
    pub protection_amount: ScaledAmount,
    pub risk_tier: RiskTier,
    /// Premium computed off-chain (scaled)
    pub submitted_premium: ScaledAmount,
    /// Underlying asset identifier
    pub asset: String,
    /// Policy owner
    pub counterparty: String,
    pub expiration: ExpirationMarker,
    /// Decimal places used by the financial fields
    pub scale_decimals: u32,
}

impl PolicyRequest {
    /// Shape checks that do not need any collaborator
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.scale_decimals != SCALE_DECIMALS {
            return Err(ValidationError::ScaleMismatch {
                expected: SCALE_DECIMALS,
                actual: self.scale_decimals,
            });
        }
        if self.protected_value.is_zero() {
            return Err(ValidationError::ZeroAmount {
                field: "protected_value",
            });
        }
        if self.protection_amount.is_zero() {
            return Err(ValidationError::ZeroAmount {
                field: "protection_amount",
            });
        }
        if self.asset.is_empty() {
            return Err(ValidationError::MissingField("asset"));
        }
        if self.counterparty.is_empty() {
            return Err(ValidationError::MissingField("counterparty"));
        }
        Ok(())
    }

    /// Freeze the request into policy terms
    pub fn to_terms(&self) -> PolicyTerms {
        PolicyTerms {
            option_type: self.option_type,
            protected_value: self.protected_value,
            protection_amount: self.protection_amount,
            risk_tier: self.risk_tier,
            premium: self.submitted_premium,
            asset: self.asset.clone(),
            counterparty: self.counterparty.clone(),
            expiration: self.expiration,
        }
    }
}

/// Immutable terms of an active policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTerms {
    pub option_type: OptionType,
    pub protected_value: ScaledAmount,
    pub protection_amount: ScaledAmount,
    pub risk_tier: RiskTier,
    /// Premium accepted at creation
    pub premium: ScaledAmount,
    pub asset: String,
    pub counterparty: String,
    pub expiration: ExpirationMarker,
}

/// Acceptable premium range, derived per verification call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumBounds {
    pub min: ScaledAmount,
    pub max: ScaledAmount,
}

impl PremiumBounds {
    #[inline]
    pub fn contains(&self, premium: ScaledAmount) -> bool {
        self.min <= premium && premium <= self.max
    }
}

/// How a policy ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementOutcome {
    /// In the money, payout owed
    Exercised,
    /// At or out of the money
    Expired,
}

/// Final payout computed at expiration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    pub payout: ScaledAmount,
    /// Per-unit intrinsic value at the expiration price
    pub intrinsic_value: ScaledAmount,
    pub expiration_price: ScaledAmount,
    pub outcome: SettlementOutcome,
}
