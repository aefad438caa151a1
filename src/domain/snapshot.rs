//! Daily portfolio snapshots and per-advisor run output.

use chrono::NaiveDate;

use super::holdings::Holdings;

/// One ticker's slice of a snapshot. Close and subtotal are `None` on days the
/// dataset has no bar for the ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerState {
    pub ticker: String,
    pub quantity: f64,
    pub close: Option<f64>,
    pub value_usd: Option<f64>,
}

/// One dated row of a simulation run: the full holdings plus per-ticker close
/// prices and USD subtotals. Append-only; never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub advisor: String,
    /// True only for the day-0 row produced by the allocation converter.
    pub is_initial: bool,
    pub total_value_usd: f64,
    pub cash: f64,
    /// In the simulation's ticker input order — the report's column order.
    pub positions: Vec<TickerState>,
}

impl Snapshot {
    /// Verbatim copy with only the date replaced: the closed-market-day policy.
    /// Value must not drift on a day with no trading.
    pub fn carried_forward(&self, date: NaiveDate) -> Snapshot {
        Snapshot {
            date,
            is_initial: false,
            ..self.clone()
        }
    }
}

/// The complete output of one advisor's simulation: an ordered snapshot
/// sequence, strictly increasing in date, independent of every other run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRun {
    pub advisor: String,
    pub initial_holdings: Holdings,
    pub snapshots: Vec<Snapshot>,
}

impl SimulationRun {
    pub fn final_value(&self) -> Option<f64> {
        self.snapshots.last().map(|s| s.total_value_usd)
    }
}
