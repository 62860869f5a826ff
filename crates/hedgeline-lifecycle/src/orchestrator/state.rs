//! Policy state machine
//!
//! ```text
//! Requested → Verified → Active → Exercised ─┐
//!                                └→ Expired ──┴→ Settled
//! ```
//!
//! Transitions outside [`PolicyState::TRANSITIONS`] are rejected. A
//! [`PolicyRecord`] keeps every state it passed through.

use crate::collaborators::Reservation;
use hedgeline_common::{
    LifecycleError, PolicyId, PolicyTerms, Result, SettlementOutcome, SettlementResult,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyState {
    Requested,
    Verified,
    Active,
    Exercised,
    Expired,
    Settled,
}

impl PolicyState {
    /// Every permitted `(from, to)` pair
    pub const TRANSITIONS: [(PolicyState, PolicyState); 6] = [
        (PolicyState::Requested, PolicyState::Verified),
        (PolicyState::Verified, PolicyState::Active),
        (PolicyState::Active, PolicyState::Exercised),
        (PolicyState::Active, PolicyState::Expired),
        (PolicyState::Exercised, PolicyState::Settled),
        (PolicyState::Expired, PolicyState::Settled),
    ];

    pub fn can_transition_to(self, to: PolicyState) -> bool {
        Self::TRANSITIONS.contains(&(self, to))
    }

    pub fn is_terminal(self) -> bool {
        self == PolicyState::Settled
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            PolicyState::Requested => "requested",
            PolicyState::Verified => "verified",
            PolicyState::Active => "active",
            PolicyState::Exercised => "exercised",
            PolicyState::Expired => "expired",
            PolicyState::Settled => "settled",
        }
    }
}

impl From<SettlementOutcome> for PolicyState {
    fn from(outcome: SettlementOutcome) -> Self {
        match outcome {
            SettlementOutcome::Exercised => PolicyState::Exercised,
            SettlementOutcome::Expired => PolicyState::Expired,
        }
    }
}

impl fmt::Display for PolicyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a policy's state history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    pub state: PolicyState,
    /// Unix milliseconds
    pub at: i64,
}

/// Persisted state of one policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRecord {
    pub id: PolicyId,
    pub state: PolicyState,
    pub terms: PolicyTerms,
    /// Collateral held while the policy is open
    pub reservation: Option<Reservation>,
    /// Set once, on settlement
    pub settlement: Option<SettlementResult>,
    pub history: Vec<StateChange>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl PolicyRecord {
    /// Fresh record in the `Requested` state
    pub fn requested(id: PolicyId, terms: PolicyTerms) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id,
            state: PolicyState::Requested,
            terms,
            reservation: None,
            settlement: None,
            history: vec![StateChange {
                state: PolicyState::Requested,
                at: now,
            }],
            created_at: now,
            updated_at: now,
        }
    }

    /// Move to `to` if the table allows it
    pub fn transition(&mut self, to: PolicyState) -> Result<()> {
        if !self.state.can_transition_to(to) {
            return Err(LifecycleError::InvalidTransition {
                from: self.state.to_string(),
                to: to.to_string(),
            }
            .into());
        }

        let now = chrono::Utc::now().timestamp_millis();
        self.state = to;
        self.history.push(StateChange { state: to, at: now });
        self.updated_at = now;
        Ok(())
    }

    /// States visited, oldest first
    pub fn visited(&self) -> Vec<PolicyState> {
        self.history.iter().map(|change| change.state).collect()
    }
}
