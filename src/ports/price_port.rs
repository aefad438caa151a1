//! Price data access port trait.

use crate::domain::ohlcv::PriceBar;
use chrono::NaiveDate;

/// Read-only lookup over a pre-loaded historical dataset. Implementations are
/// immutable after load, so concurrent simulation runs share one instance
/// without locking.
pub trait PricePort: Send + Sync {
    /// The bar for one ticker on one date, if the dataset has it.
    fn bar(&self, ticker: &str, date: NaiveDate) -> Option<PriceBar>;

    /// Market-open proxy: does any ticker have a bar on this date. This is a
    /// property of the loaded dataset, not a real exchange calendar.
    fn is_open(&self, date: NaiveDate) -> bool;

    /// Close of the most recent bar at or before `date` for `ticker`.
    fn latest_close_at_or_before(&self, ticker: &str, date: NaiveDate) -> Option<f64>;
}
