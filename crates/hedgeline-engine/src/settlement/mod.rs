//! Settlement computation at expiration

pub mod calculator;

pub use calculator::calculate_settlement;
