//! Policy lifecycle orchestrator
//!
//! Coordinates policy creation:
//! 1. Validates the request shape and scale
//! 2. Fetches the current price from the oracle
//! 3. Fetches the tier's parameters from the parameter store
//! 4. Re-derives premium bounds and verifies the submitted premium
//! 5. Reserves collateral in the vault
//! 6. Commits the policy as Active
//!
//! and settlement:
//! 1. Returns the stored result if the policy is already Settled
//! 2. Fetches the expiration price from the oracle
//! 3. Computes the payout
//! 4. Releases the collateral reservation
//! 5. Commits the policy as Settled
//!
//! Each transition works on a copy of the record and writes it back once at
//! the end, so a failure at any step leaves the stored state untouched.

use super::state::{PolicyRecord, PolicyState};
use super::store::PolicyStore;
use crate::collaborators::{CollateralVault, ParameterStore, PriceOracle, Reservation};
use crate::config::LifecycleConfig;
use crate::metrics::LifecycleMetrics;
use hedgeline_common::{
    fixed_point::mul_down, CollaboratorError, ExpirationMarker, HedgelineError, LifecycleError,
    LiquidityError, PolicyId, PolicyRequest, PolicyTerms, PremiumBounds, Result, ScaledAmount,
    SettlementResult,
};
use hedgeline_engine::{
    calculate_settlement, verify_with_model, BoundsModel, PremiumVerdict, ProportionalBoundsModel,
    SystemParameters,
};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Drives policies through creation and settlement
pub struct PolicyOrchestrator {
    config: LifecycleConfig,
    oracle: Arc<dyn PriceOracle>,
    parameters: Arc<dyn ParameterStore>,
    vault: Arc<dyn CollateralVault>,
    model: Box<dyn BoundsModel>,
    store: Arc<PolicyStore>,
    metrics: Arc<LifecycleMetrics>,
}

impl PolicyOrchestrator {
    /// Create an orchestrator with the proportional bounds model and an
    /// empty policy store
    pub fn new(
        config: LifecycleConfig,
        oracle: Arc<dyn PriceOracle>,
        parameters: Arc<dyn ParameterStore>,
        vault: Arc<dyn CollateralVault>,
    ) -> Result<Self> {
        config.validate()?;
        let metrics = LifecycleMetrics::new(&config.metrics_prefix)
            .map_err(|e| HedgelineError::Config(format!("Failed to create metrics: {}", e)))?;

        Ok(Self {
            config,
            oracle,
            parameters,
            vault,
            model: Box::new(ProportionalBoundsModel),
            store: Arc::new(PolicyStore::new()),
            metrics: Arc::new(metrics),
        })
    }

    /// Replace the bounds model
    pub fn with_bounds_model(mut self, model: Box<dyn BoundsModel>) -> Self {
        self.model = model;
        self
    }

    /// Use an existing policy store, e.g. one restored from a snapshot
    pub fn with_store(mut self, store: Arc<PolicyStore>) -> Self {
        self.store = store;
        self
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    pub fn metrics(&self) -> &LifecycleMetrics {
        &self.metrics
    }

    pub fn store(&self) -> &Arc<PolicyStore> {
        &self.store
    }

    /// Snapshot of a policy record
    pub fn policy(&self, policy_id: PolicyId) -> Option<PolicyRecord> {
        self.store.get(policy_id)
    }

    /// Ids of policies in `state`, e.g. Active ones awaiting settlement
    pub fn policies_in_state(&self, state: PolicyState) -> Vec<PolicyId> {
        self.store.ids_in_state(state)
    }

    /// Create a policy: `Requested → Verified → Active`
    ///
    /// On any failure no record is stored and no collateral stays reserved.
    #[instrument(skip(self, request), fields(asset = %request.asset, tier = %request.risk_tier))]
    pub async fn create_policy(
        &self,
        policy_id: PolicyId,
        request: PolicyRequest,
    ) -> Result<PolicyRecord> {
        request.validate()?;

        let _guard = self.store.lock(policy_id).await;
        if self.store.contains(policy_id) {
            return Err(LifecycleError::DuplicatePolicy(policy_id.to_string()).into());
        }

        let mut record = PolicyRecord::requested(policy_id, request.to_terms());

        let bounds = self.verify_premium(&record.terms).await?;
        record.transition(PolicyState::Verified)?;
        debug!(%policy_id, min = %bounds.min, max = %bounds.max, "Premium verified");

        let collateral = required_collateral(&record.terms)?;
        let reservation = match self.reserve(policy_id, collateral).await {
            Ok(reservation) => reservation,
            Err(err) => {
                if !matches!(
                    err,
                    HedgelineError::Liquidity(LiquidityError::InsufficientLiquidity { .. })
                ) {
                    // A timed out reserve may still have landed
                    self.release_on_abort(policy_id).await;
                }
                return Err(err);
            }
        };

        record.reservation = Some(reservation);
        if let Err(err) = record.transition(PolicyState::Active) {
            self.release_on_abort(policy_id).await;
            return Err(err);
        }

        self.store.commit(record.clone());
        self.metrics.policies_created.inc();
        info!(
            %policy_id,
            premium = %record.terms.premium,
            collateral = %collateral,
            "Policy active"
        );

        Ok(record)
    }

    /// Settle a policy: `Active → Exercised | Expired → Settled`
    ///
    /// Settling an already settled policy returns the recorded result without
    /// recomputing it or touching any collaborator.
    #[instrument(skip(self))]
    pub async fn settle_policy(
        &self,
        policy_id: PolicyId,
        now: ExpirationMarker,
    ) -> Result<SettlementResult> {
        let _guard = self.store.lock(policy_id).await;
        let mut record = self
            .store
            .get(policy_id)
            .ok_or_else(|| LifecycleError::PolicyNotFound(policy_id.to_string()))?;

        if record.state == PolicyState::Settled {
            if let Some(result) = record.settlement {
                debug!(%policy_id, "Policy already settled");
                return Ok(result);
            }
        }

        if record.state != PolicyState::Active {
            return Err(LifecycleError::InvalidTransition {
                from: record.state.to_string(),
                to: PolicyState::Settled.to_string(),
            }
            .into());
        }

        let expiration = record.terms.expiration;
        if !expiration.has_passed(now) {
            return Err(LifecycleError::NotExpired {
                expiration: expiration.value(),
                now: now.value(),
            }
            .into());
        }

        let asset = record.terms.asset.clone();
        let expiration_price = self
            .bounded("oracle", self.oracle.price_at(&asset, expiration))
            .await?;

        let terms = &record.terms;
        let result = calculate_settlement(
            terms.option_type,
            terms.protected_value,
            terms.protection_amount,
            expiration_price,
        )?;

        record.transition(PolicyState::from(result.outcome))?;
        record.settlement = Some(result);
        record.transition(PolicyState::Settled)?;

        if record.reservation.is_some() {
            match self.bounded("vault", self.vault.release(policy_id)).await {
                Ok(_) => {}
                // Released by an earlier attempt whose reply was lost
                Err(HedgelineError::Liquidity(LiquidityError::UnknownReservation(_))) => {}
                Err(err) => return Err(err),
            }
            record.reservation = None;
        }

        self.store.commit(record);
        self.metrics
            .settlements
            .with_label_values(&[outcome_label(&result)])
            .inc();
        info!(
            %policy_id,
            payout = %result.payout,
            price = %expiration_price,
            outcome = ?result.outcome,
            "Policy settled"
        );

        Ok(result)
    }

    /// Fetch price and parameters, then re-derive bounds for `terms`
    async fn verify_premium(&self, terms: &PolicyTerms) -> Result<PremiumBounds> {
        let current_price = self
            .bounded("oracle", self.oracle.current_price(&terms.asset))
            .await?;
        let adjustment = self
            .bounded("parameter_store", self.parameters.risk_adjustment(terms.risk_tier))
            .await?;
        let params = SystemParameters::new(self.config.time_value_bps, adjustment);

        let verdict = verify_with_model(
            self.model.as_ref(),
            terms.premium,
            terms.option_type,
            terms.protected_value,
            terms.protection_amount,
            current_price,
            terms.risk_tier,
            &params,
        )?;

        match verdict {
            PremiumVerdict::Accept { bounds } => Ok(bounds),
            PremiumVerdict::Reject(rejection) => {
                self.metrics.premium_rejections.inc();
                warn!(%current_price, "{}", rejection);
                Err(rejection.into())
            }
        }
    }

    async fn reserve(&self, policy_id: PolicyId, amount: ScaledAmount) -> Result<Reservation> {
        let result = self
            .bounded("vault", self.vault.check_and_reserve(policy_id, amount))
            .await;
        if let Err(HedgelineError::Liquidity(LiquidityError::InsufficientLiquidity {
            available,
            ..
        })) = &result
        {
            self.metrics.liquidity_rejections.inc();
            warn!(%policy_id, required = %amount, %available, "Insufficient liquidity");
        }
        result
    }

    /// Best-effort release after an aborted creation
    async fn release_on_abort(&self, policy_id: PolicyId) {
        match self.bounded("vault", self.vault.release(policy_id)).await {
            Ok(amount) => debug!(%policy_id, %amount, "Reservation rolled back"),
            Err(HedgelineError::Liquidity(LiquidityError::UnknownReservation(_))) => {}
            Err(err) => warn!(%policy_id, error = %err, "Failed to roll back reservation"),
        }
    }

    /// Run a collaborator call under the configured timeout
    async fn bounded<T, F>(&self, collaborator: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let result = match tokio::time::timeout(self.config.collaborator_timeout(), call).await {
            Ok(result) => result,
            Err(_) => Err(CollaboratorError::Timeout {
                collaborator,
                timeout_ms: self.config.collaborator_timeout_ms,
            }
            .into()),
        };

        if let Err(err) = &result {
            if err.is_retryable() {
                self.metrics
                    .collaborator_failures
                    .with_label_values(&[collaborator])
                    .inc();
                warn!(collaborator, error = %err, "Collaborator call failed");
            }
        }
        result
    }
}

/// Collateral held for an active policy: `protected_value × protection_amount`
///
/// This is the largest possible Put payout. A Call's payout grows with the
/// expiration price without limit, so for Calls the hold is a flat reserve
/// rather than full cover.
pub fn required_collateral(terms: &PolicyTerms) -> Result<ScaledAmount> {
    Ok(mul_down(terms.protected_value, terms.protection_amount)?)
}

fn outcome_label(result: &SettlementResult) -> &'static str {
    PolicyState::from(result.outcome).as_str()
}
