//! Always-Cash advisor: liquidate everything.

use chrono::NaiveDate;

use crate::domain::advisor::Advisor;
use crate::domain::error::StockAdvisorError;
use crate::domain::holdings::Holdings;
use crate::domain::recommendation::{Action, Recommendation};
use crate::domain::rounding::round_shares;
use crate::ports::price_port::PricePort;

/// Sells the full quantity of every held ticker; does nothing with tickers it
/// does not hold. Ignores the date and the price data entirely.
pub struct AlwaysCash;

impl Advisor for AlwaysCash {
    fn id(&self) -> &'static str {
        "always_cash"
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
            if quantity > 0.0 {
                rec.advise(ticker, quantity, Action::Sell(round_shares(quantity)));
            } else {
                rec.advise(ticker, quantity, Action::DoNothing);
            }
        }
        Ok(rec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::csv_price_adapter::CsvPriceAdapter;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 10).unwrap()
    }

    fn tickers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sells_all_held_positions() {
        let store = CsvPriceAdapter::from_bars(vec![]);
        let mut holdings = Holdings::new(500.0);
        holdings.set_quantity("AAPL", 2.29);
        holdings.set_quantity("NVDA", 0.0);

        let rec = AlwaysCash
            .recommend(&holdings, &tickers(&["AAPL", "NVDA"]), date(), &store)
            .unwrap();

        assert_eq!(rec.cash, 500.0);
        assert_eq!(rec.get("AAPL").unwrap().action, Action::Sell(2.29));
        assert_eq!(rec.get("NVDA").unwrap().action, Action::DoNothing);
    }

    #[test]
    fn empty_portfolio_recommends_nothing_but_cash() {
        let store = CsvPriceAdapter::from_bars(vec![]);
        let holdings = Holdings::new(1000.0);

        let rec = AlwaysCash
            .recommend(&holdings, &tickers(&["AAPL"]), date(), &store)
            .unwrap();

        assert_eq!(rec.cash, 1000.0);
        assert_eq!(rec.get("AAPL").unwrap().action, Action::DoNothing);
    }
}
