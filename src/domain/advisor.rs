//! Advisor strategy interface and registry.

use chrono::NaiveDate;

use super::advisors::{always_cash::AlwaysCash, always_hold::AlwaysHold, dory::Dory};
use super::error::StockAdvisorError;
use super::holdings::Holdings;
use super::recommendation::Recommendation;
use crate::ports::price_port::PricePort;

/// A pure daily strategy: given current holdings and a date, produce one
/// recommendation per ticker (plus pass-through cash). Advisors size their own
/// trades; the applier only does the bookkeeping.
pub trait Advisor: Send + Sync {
    fn id(&self) -> &'static str;

    /// `tickers` is the simulation's ticker list in input order; that order is
    /// the tie-break order for strategies that rank tickers.
    fn recommend(
        &self,
        holdings: &Holdings,
        tickers: &[String],
        date: NaiveDate,
        store: &dyn PricePort,
    ) -> Result<Recommendation, StockAdvisorError>;
}

/// The closed set of registered advisor identifiers.
pub const ADVISOR_IDS: [&str; 3] = ["always_cash", "always_hold", "dory"];

/// Look up a strategy implementation by identifier.
pub fn advisor_by_id(id: &str) -> Option<Box<dyn Advisor>> {
    match id {
        "always_cash" => Some(Box::new(AlwaysCash)),
        "always_hold" => Some(Box::new(AlwaysHold)),
        "dory" => Some(Box::new(Dory)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_all_ids() {
        for id in ADVISOR_IDS {
            let advisor = advisor_by_id(id).unwrap();
            assert_eq!(advisor.id(), id);
        }
    }

    #[test]
    fn unknown_id_returns_none() {
        assert!(advisor_by_id("marlin").is_none());
        assert!(advisor_by_id("").is_none());
        assert!(advisor_by_id("Always_Cash").is_none());
    }
}
