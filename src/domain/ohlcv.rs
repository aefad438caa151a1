//! Daily OHLCV bar representation.

use chrono::NaiveDate;

/// One day of price data for one ticker. Uniquely keyed by (ticker, date).
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub ticker: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl PriceBar {
    /// Open-to-close move for the day, in percent: (close - open) / open * 100.
    pub fn intraday_change_pct(&self) -> f64 {
        (self.close - self.open) / self.open * 100.0
    }
}
