//! Port traits implemented by adapters and test doubles.

pub mod price_port;
pub mod config_port;
pub mod report_port;
