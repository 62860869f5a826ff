//! Core data types for Hedgeline

pub mod option;
pub mod policy;
pub mod tier;
