//! Concrete port implementations.

pub mod csv_price_adapter;
pub mod file_config_adapter;
pub mod csv_report_adapter;
