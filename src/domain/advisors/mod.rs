//! Built-in advisor strategy implementations.

pub mod always_cash;
pub mod always_hold;
pub mod dory;
