//! Core domain types and simulation logic.

pub mod comparison;
pub mod config_validation;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod normalize;
pub mod portfolio;
pub mod price_series;
pub mod raw_history;
pub mod simulator;
pub mod strategy;
pub mod universe;
