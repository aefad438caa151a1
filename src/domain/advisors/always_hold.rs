//! Always-Hold advisor: never trade.

use chrono::NaiveDate;

use crate::domain::advisor::Advisor;
use crate::domain::error::StockAdvisorError;
use crate::domain::holdings::Holdings;
use crate::domain::recommendation::{Action, Recommendation};
use crate::ports::price_port::PricePort;

/// Holds every ticker it owns and does nothing with the rest. The buy-and-hold
/// baseline the other advisors are measured against.
pub struct AlwaysHold;

impl Advisor for AlwaysHold {
    fn id(&self) -> &'static str {
        "always_hold"
    }

    fn recommend(
        &self,
        holdings: &Holdings,
        tickers: &[String],
        _date: NaiveDate,
        _store: &dyn PricePort,
    ) -> Result<Recommendation, StockAdvisorError> {
        let mut rec = Recommendation::new(holdings.cash);
        for ticker in tickers {
            let quantity = holdings.quantity(ticker);
            let action = if quantity > 0.0 {
                Action::Hold
            } else {
                Action::DoNothing
            };
            rec.advise(ticker, quantity, action);
        }
        Ok(rec)
    }
}
