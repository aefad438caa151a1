//! Core domain types and logic.

pub mod ohlcv;
pub mod rounding;
pub mod holdings;
pub mod recommendation;
pub mod applier;
pub mod allocation;
pub mod advisor;
pub mod advisors;
pub mod snapshot;
pub mod simulation;
pub mod config_validation;
pub mod error;
