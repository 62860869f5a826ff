//! Policy lifecycle: state machine, store and orchestrator

pub mod lifecycle;
pub mod state;
pub mod store;

pub use lifecycle::{required_collateral, PolicyOrchestrator};
pub use state::{PolicyRecord, PolicyState, StateChange};
pub use store::{PolicyGuard, PolicyStore};
