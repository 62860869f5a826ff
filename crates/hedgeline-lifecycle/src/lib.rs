//! # Hedgeline Lifecycle
//!
//! Moves a policy through its lifecycle against three external
//! collaborators: a price oracle, a parameter store and a collateral vault.
//!
//! ```text
//! Requested → Verified → Active → Exercised | Expired → Settled
//! ```
//!
//! - **Creation** re-verifies the quoted premium against freshly fetched
//!   price and tier parameters, then reserves collateral. A rejected premium
//!   or missing liquidity leaves no policy and no reservation behind.
//! - **Settlement** fetches the expiration price, computes the payout once
//!   and releases collateral. Repeating it returns the recorded result.
//!
//! Every collaborator call is bounded by
//! [`LifecycleConfig::collaborator_timeout_ms`]; a slow or dead dependency
//! surfaces as a retryable [`hedgeline_common::CollaboratorError`].

pub mod collaborators;
pub mod config;
pub mod metrics;
pub mod orchestrator;

pub use collaborators::{
    CollateralVault, InMemoryOracle, InMemoryVault, ParameterStore, PriceOracle, Reservation,
    StaticParameterStore,
};
pub use config::LifecycleConfig;
pub use metrics::LifecycleMetrics;
pub use orchestrator::{PolicyOrchestrator, PolicyRecord, PolicyState, PolicyStore, StateChange};
