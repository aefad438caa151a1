//! Initial allocation handling: percentages to share counts.

use chrono::NaiveDate;

use super::error::StockAdvisorError;
use super::holdings::Holdings;
use super::rounding::{round_shares, round_usd};
use crate::ports::price_port::PricePort;

/// Reserved allocation key for the cash entry.
pub const CASH_KEY: &str = "Cash";

const SUM_TOLERANCE: f64 = 1e-6;

/// Check that allocation percentages are non-negative and sum to 100.
///
/// Called once, up front, before any advisor run starts; the converter itself
/// does not re-validate.
pub fn validate_allocations(allocations: &[(String, f64)]) -> Result<(), StockAdvisorError> {
    for (key, percent) in allocations {
        if *percent < 0.0 {
            return Err(StockAdvisorError::InvalidAllocation {
                reason: format!("negative percentage for {key}: {percent}"),
            });
        }
    }
    let sum: f64 = allocations.iter().map(|(_, p)| p).sum();
    if (sum - 100.0).abs() > SUM_TOLERANCE {
        return Err(StockAdvisorError::InvalidAllocation {
            reason: format!("percentages sum to {sum}, expected 100"),
        });
    }
    Ok(())
}

/// Convert percentage allocations plus a total USD value into holdings.
///
/// Non-cash entries are priced at the most recent close at or before
/// `as_of_date`; a ticker with no bar at all before that date fails the whole
/// conversion with `NoHistoricalData`.
pub fn shares_for_allocations(
    store: &dyn PricePort,
    allocations: &[(String, f64)],
    total_value: f64,
    as_of_date: NaiveDate,
) -> Result<Holdings, StockAdvisorError> {
    let mut holdings = Holdings::new(0.0);

    for (key, percent) in allocations {
        let usd_value = percent / 100.0 * total_value;
        if key == CASH_KEY {
            holdings.cash = round_usd(usd_value);
        } else {
            let close = store.latest_close_at_or_before(key, as_of_date).ok_or_else(|| {
                StockAdvisorError::NoHistoricalData {
                    ticker: key.clone(),
                    date: as_of_date,
                }
            })?;
            holdings.set_quantity(key, round_shares(usd_value / close));
        }
    }

    Ok(holdings)
}
