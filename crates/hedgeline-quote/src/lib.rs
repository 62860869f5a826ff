//! # Hedgeline Quote
//!
//! Off-chain preparation of policy requests.
//!
//! Turns user-facing inputs (decimal prices, option type and tier strings)
//! into a [`hedgeline_common::PolicyRequest`] the orchestrator accepts:
//!
//! - **Tier**: derived from how far the strike sits from spot when the
//!   buyer does not pick one; providers always name theirs.
//! - **Premium**: Black–Scholes price per unit × amount, scaled by the
//!   tier's premium adjustment from the shared parameter table.
//! - **Scaling**: every amount goes through [`hedgeline_common::ScaledAmount`]
//!   so both sides agree on precision.
//!
//! The premium produced here is only a candidate. The lifecycle orchestrator
//! re-derives bounds on its own and may still reject it.

pub mod config;
pub mod preparer;
pub mod pricing;
pub mod tier;

pub use config::QuoteConfig;
pub use preparer::{PreparedQuote, QuoteInput, QuotePreparer};
pub use tier::{derive_buyer_tier, protected_ratio, resolve_tier};
