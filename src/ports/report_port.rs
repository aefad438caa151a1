//! Result export port trait.

use crate::domain::error::StockAdvisorError;
use crate::domain::snapshot::SimulationRun;

/// Port for writing simulation results for downstream reporting.
pub trait ReportPort {
    fn write(&self, runs: &[SimulationRun], output_path: &str) -> Result<(), StockAdvisorError>;
}
