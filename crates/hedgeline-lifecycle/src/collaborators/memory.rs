//! In-memory collaborators
//!
//! Reference implementations of the collaborator traits, used by tests and
//! local runs. The vault keeps available and reserved capital the way an
//! escrow wallet tracks available and locked balance.

use super::{CollateralVault, ParameterStore, PriceOracle, Reservation};
use async_trait::async_trait;
use dashmap::DashMap;
use hedgeline_common::{
    CollaboratorError, ExpirationMarker, LiquidityError, PolicyId, Result, RiskAdjustment,
    RiskTier, ScaledAmount, ValidationError,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, instrument};

/// Oracle backed by in-memory price tables
#[derive(Default)]
pub struct InMemoryOracle {
    spot: DashMap<String, ScaledAmount>,
    settlement: DashMap<(String, ExpirationMarker), ScaledAmount>,
    latency: Option<Duration>,
    offline: AtomicBool,
    calls: AtomicU64,
}

impl InMemoryOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every lookup by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn set_price(&self, asset: &str, price: ScaledAmount) {
        self.spot.insert(asset.to_string(), price);
    }

    pub fn set_price_at(&self, asset: &str, expiration: ExpirationMarker, price: ScaledAmount) {
        self.settlement.insert((asset.to_string(), expiration), price);
    }

    /// Make every lookup fail with `PriceUnavailable`
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of lookups served so far
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    async fn before_lookup(&self, asset: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(unavailable(asset, "oracle offline"));
        }
        Ok(())
    }
}

fn unavailable(asset: &str, reason: &str) -> hedgeline_common::HedgelineError {
    CollaboratorError::PriceUnavailable {
        asset: asset.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

#[async_trait]
impl PriceOracle for InMemoryOracle {
    async fn current_price(&self, asset: &str) -> Result<ScaledAmount> {
        self.before_lookup(asset).await?;
        self.spot
            .get(asset)
            .map(|price| *price)
            .ok_or_else(|| unavailable(asset, "no spot price"))
    }

    async fn price_at(&self, asset: &str, expiration: ExpirationMarker) -> Result<ScaledAmount> {
        self.before_lookup(asset).await?;
        self.settlement
            .get(&(asset.to_string(), expiration))
            .map(|price| *price)
            .ok_or_else(|| unavailable(asset, &format!("no price at {}", expiration)))
    }
}

/// Parameter store serving a fixed tier table
pub struct StaticParameterStore {
    table: DashMap<RiskTier, RiskAdjustment>,
}

impl StaticParameterStore {
    /// Store holding only the given entries
    pub fn from_entries(entries: impl IntoIterator<Item = RiskAdjustment>) -> Self {
        let table = DashMap::new();
        for adjustment in entries {
            table.insert(adjustment.tier, adjustment);
        }
        Self { table }
    }

    /// Replace the entry for `adjustment.tier`
    pub fn set(&self, adjustment: RiskAdjustment) {
        self.table.insert(adjustment.tier, adjustment);
    }
}

impl Default for StaticParameterStore {
    /// The built-in table for every tier
    fn default() -> Self {
        Self::from_entries(RiskTier::all().map(RiskAdjustment::default_for))
    }
}

#[async_trait]
impl ParameterStore for StaticParameterStore {
    async fn risk_adjustment(&self, tier: RiskTier) -> Result<RiskAdjustment> {
        self.table.get(&tier).map(|entry| *entry).ok_or_else(|| {
            ValidationError::UnknownTier {
                role: tier.role().to_string(),
                tier: tier.name().to_string(),
            }
            .into()
        })
    }
}

#[derive(Debug, Default)]
struct VaultState {
    available: ScaledAmount,
    reservations: HashMap<PolicyId, ScaledAmount>,
}

/// Vault tracking available and reserved capital
#[derive(Default)]
pub struct InMemoryVault {
    state: Mutex<VaultState>,
    offline: AtomicBool,
}

impl InMemoryVault {
    /// Vault with `available` unreserved capital
    pub fn with_capital(available: ScaledAmount) -> Self {
        Self {
            state: Mutex::new(VaultState {
                available,
                reservations: HashMap::new(),
            }),
            offline: AtomicBool::new(false),
        }
    }

    /// Add unreserved capital
    pub fn deposit(&self, amount: ScaledAmount) -> Result<()> {
        let mut state = self.state.lock();
        state.available = state.available.checked_add(amount)?;
        Ok(())
    }

    pub fn available(&self) -> ScaledAmount {
        self.state.lock().available
    }

    /// Sum of all outstanding reservations
    pub fn reserved(&self) -> ScaledAmount {
        self.state
            .lock()
            .reservations
            .values()
            .fold(ScaledAmount::ZERO, |acc, amount| acc.saturating_add(*amount))
    }

    pub fn reservation(&self, policy_id: PolicyId) -> Option<ScaledAmount> {
        self.state.lock().reservations.get(&policy_id).copied()
    }

    pub fn reservation_count(&self) -> usize {
        self.state.lock().reservations.len()
    }

    /// Make every call fail with `VaultUnavailable`
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CollaboratorError::VaultUnavailable("vault offline".to_string()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl CollateralVault for InMemoryVault {
    #[instrument(skip(self))]
    async fn check_and_reserve(
        &self,
        policy_id: PolicyId,
        amount: ScaledAmount,
    ) -> Result<Reservation> {
        self.ensure_online()?;
        let mut state = self.state.lock();

        // Repeated reserve for the same policy returns the existing hold
        if let Some(existing) = state.reservations.get(&policy_id) {
            return Ok(Reservation {
                policy_id,
                amount: *existing,
            });
        }

        if state.available < amount {
            return Err(LiquidityError::InsufficientLiquidity {
                required: amount,
                available: state.available,
            }
            .into());
        }

        state.available = state.available.checked_sub(amount)?;
        state.reservations.insert(policy_id, amount);
        debug!(%policy_id, %amount, "Collateral reserved");

        Ok(Reservation { policy_id, amount })
    }

    #[instrument(skip(self))]
    async fn release(&self, policy_id: PolicyId) -> Result<ScaledAmount> {
        self.ensure_online()?;
        let mut state = self.state.lock();

        let amount = state
            .reservations
            .remove(&policy_id)
            .ok_or_else(|| LiquidityError::UnknownReservation(policy_id.to_string()))?;
        state.available = state.available.checked_add(amount)?;
        debug!(%policy_id, %amount, "Collateral released");

        Ok(amount)
    }
}
