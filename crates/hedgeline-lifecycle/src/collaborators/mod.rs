//! External collaborators consumed by the orchestrator
//!
//! The oracle, parameter store and collateral vault live outside the core.
//! The orchestrator only sees these traits and bounds every call with a
//! timeout, so any implementation that hangs surfaces as a typed failure.

pub mod memory;

use async_trait::async_trait;
use hedgeline_common::{
    ExpirationMarker, PolicyId, Result, RiskAdjustment, RiskTier, Role, ScaledAmount,
};
use serde::{Deserialize, Serialize};

pub use memory::{InMemoryOracle, InMemoryVault, StaticParameterStore};

/// Price source
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Latest price for `asset`
    async fn current_price(&self, asset: &str) -> Result<ScaledAmount>;

    /// Price for `asset` recorded at `expiration`
    async fn price_at(&self, asset: &str, expiration: ExpirationMarker) -> Result<ScaledAmount>;
}

/// Source of per-tier premium parameters
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Adjustment for a role-scoped tier
    async fn risk_adjustment(&self, tier: RiskTier) -> Result<RiskAdjustment>;

    /// Adjustment by tier name within `role`'s table
    async fn risk_adjustment_by_name(&self, role: Role, tier: &str) -> Result<RiskAdjustment> {
        let tier = RiskTier::parse(role, tier)?;
        self.risk_adjustment(tier).await
    }
}

/// Collateral held against a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub policy_id: PolicyId,
    pub amount: ScaledAmount,
}

/// Capital backing active policies
///
/// Reservations are keyed by policy so a release can be issued even when the
/// reserve call itself timed out.
#[async_trait]
pub trait CollateralVault: Send + Sync {
    /// Atomically check availability and reserve `amount` for `policy_id`
    async fn check_and_reserve(&self, policy_id: PolicyId, amount: ScaledAmount)
        -> Result<Reservation>;

    /// Return the reservation held for `policy_id`
    async fn release(&self, policy_id: PolicyId) -> Result<ScaledAmount>;
}
