//! Role-scoped risk tiers
//!
//! Buyer and provider tiers live in separate enums. The name `conservative`
//! exists on both sides, so a tier string is only meaningful together with a
//! [`Role`]; [`RiskTier::parse`] always takes one.

use crate::error::ValidationError;
use crate::fixed_point::ScaledAmount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the policy a tier belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Buyer,
    Provider,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Provider => "provider",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Protection buyer tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuyerTier {
    Conservative,
    Standard,
    Flexible,
    CrashInsurance,
}

impl BuyerTier {
    pub const ALL: [BuyerTier; 4] = [
        BuyerTier::Conservative,
        BuyerTier::Standard,
        BuyerTier::Flexible,
        BuyerTier::CrashInsurance,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            BuyerTier::Conservative => "conservative",
            BuyerTier::Standard => "standard",
            BuyerTier::Flexible => "flexible",
            BuyerTier::CrashInsurance => "crash_insurance",
        }
    }
}

/// Liquidity provider tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderTier {
    Conservative,
    Balanced,
    Aggressive,
}

impl ProviderTier {
    pub const ALL: [ProviderTier; 3] = [
        ProviderTier::Conservative,
        ProviderTier::Balanced,
        ProviderTier::Aggressive,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ProviderTier::Conservative => "conservative",
            ProviderTier::Balanced => "balanced",
            ProviderTier::Aggressive => "aggressive",
        }
    }
}

/// A tier together with the role it was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", content = "tier", rename_all = "snake_case")]
pub enum RiskTier {
    Buyer(BuyerTier),
    Provider(ProviderTier),
}

impl RiskTier {
    /// Parse a case-sensitive tier name within the given role's table
    pub fn parse(role: Role, tier: &str) -> Result<Self, ValidationError> {
        let found = match role {
            Role::Buyer => BuyerTier::ALL
                .into_iter()
                .find(|t| t.as_str() == tier)
                .map(RiskTier::Buyer),
            Role::Provider => ProviderTier::ALL
                .into_iter()
                .find(|t| t.as_str() == tier)
                .map(RiskTier::Provider),
        };

        found.ok_or_else(|| ValidationError::UnknownTier {
            role: role.to_string(),
            tier: tier.to_string(),
        })
    }

    pub const fn role(&self) -> Role {
        match self {
            RiskTier::Buyer(_) => Role::Buyer,
            RiskTier::Provider(_) => Role::Provider,
        }
    }

    /// Tier name without the role
    pub const fn name(&self) -> &'static str {
        match self {
            RiskTier::Buyer(t) => t.as_str(),
            RiskTier::Provider(t) => t.as_str(),
        }
    }

    /// Every tier across both roles
    pub fn all() -> impl Iterator<Item = RiskTier> {
        BuyerTier::ALL
            .into_iter()
            .map(RiskTier::Buyer)
            .chain(ProviderTier::ALL.into_iter().map(RiskTier::Provider))
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.role(), self.name())
    }
}

/// Premium-bound parameters for one tier
///
/// `premium_adjustment_bps` scales the baseline premium (10_000 = unchanged);
/// `min_factor` and `max_factor` are scaled multipliers applied to the
/// adjusted baseline to produce the acceptable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAdjustment {
    /// Tier these parameters were issued for
    pub tier: RiskTier,
    /// Baseline scaling in basis points
    pub premium_adjustment_bps: u32,
    /// Lower bound multiplier (scaled, 1.0 = `ScaledAmount::ONE`)
    pub min_factor: ScaledAmount,
    /// Upper bound multiplier (scaled)
    pub max_factor: ScaledAmount,
}

impl RiskAdjustment {
    /// Built-in parameters shared by the quote and verification sides
    pub fn default_for(tier: RiskTier) -> Self {
        // (adjustment bps, min factor, max factor), factors in 1e-8 units
        let (premium_adjustment_bps, min_factor, max_factor) = match tier {
            RiskTier::Buyer(BuyerTier::Conservative) => (11_000, 80_000_000, 150_000_000),
            RiskTier::Buyer(BuyerTier::Standard) => (10_000, 70_000_000, 160_000_000),
            RiskTier::Buyer(BuyerTier::Flexible) => (9_000, 60_000_000, 180_000_000),
            RiskTier::Buyer(BuyerTier::CrashInsurance) => (8_000, 50_000_000, 200_000_000),
            RiskTier::Provider(ProviderTier::Conservative) => (10_500, 80_000_000, 150_000_000),
            RiskTier::Provider(ProviderTier::Balanced) => (10_000, 70_000_000, 160_000_000),
            RiskTier::Provider(ProviderTier::Aggressive) => (9_500, 60_000_000, 180_000_000),
        };

        Self {
            tier,
            premium_adjustment_bps,
            min_factor: ScaledAmount::from_raw(min_factor),
            max_factor: ScaledAmount::from_raw(max_factor),
        }
    }

    /// Reject parameter sets that cannot produce a valid range
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_factor > self.max_factor {
            return Err(ValidationError::InvalidParameters(format!(
                "min_factor {} exceeds max_factor {} for {}",
                self.min_factor, self.max_factor, self.tier
            )));
        }
        if self.premium_adjustment_bps == 0 {
            return Err(ValidationError::InvalidParameters(format!(
                "zero premium adjustment for {}",
                self.tier
            )));
        }
        Ok(())
    }
}
