//! Dory advisor: single-day momentum chasing.

use chrono::NaiveDate;
use log::warn;

use crate::domain::advisor::Advisor;
use crate::domain::error::StockAdvisorError;
use crate::domain::holdings::Holdings;
use crate::domain::recommendation::{Action, Recommendation};
use crate::domain::rounding::round_shares;
use crate::ports::price_port::PricePort;

/// Chases the day's strongest mover. For every ticker with a bar today, the
/// open-to-close percent change competes against an implicit "Cash" option at
/// 0%. The scan is strict-maximum in input ticker order, so Cash wins ties
/// against any stock and the first listed ticker wins ties between stocks.
///
/// When Cash wins, no trade is emitted. Otherwise the winner is bought up to a
/// full-value position (total portfolio value at today's closes divided by the
/// winner's close) and every other held ticker is sold in full.
pub struct Dory;

impl Advisor for Dory {
    fn id(&self) -> &'static str {
        "dory"
    }

    fn recommend(
        &self,
        holdings: &Holdings,
        tickers: &[String],
        date: NaiveDate,
        store: &dyn PricePort,
    ) -> Result<Recommendation, StockAdvisorError> {
        if tickers.is_empty() {
            return Err(StockAdvisorError::UnsupportedPortfolio {
                advisor: self.id().to_string(),
                reason: "at least one non-cash ticker is required".to_string(),
            });
        }

        // Tickers without a bar today sit out: no Δ, no valuation, no trade.
        let mut contenders = Vec::with_capacity(tickers.len());
        for ticker in tickers {
            match store.bar(ticker, date) {
                Some(bar) => contenders.push((ticker, bar)),
                None => warn!("dory: no price bar for {ticker} on {date}, excluding from contest"),
            }
        }

        let mut winner: Option<(&String, f64)> = None;
        let mut best_delta = 0.0; // the implicit Cash contestant
        for (ticker, bar) in &contenders {
            let delta = bar.intraday_change_pct();
            if delta > best_delta {
                best_delta = delta;
                winner = Some((*ticker, bar.close));
            }
        }

        let mut rec = Recommendation::new(holdings.cash);

        let Some((winner_ticker, winner_close)) = winner else {
            // Cash won: no trade for any ticker.
            for ticker in tickers {
                let quantity = holdings.quantity(ticker);
                let action = if quantity > 0.0 {
                    Action::Hold
                } else {
                    Action::DoNothing
                };
                rec.advise(ticker, quantity, action);
            }
            return Ok(rec);
        };

        let mut total_value = holdings.cash;
        for (ticker, bar) in &contenders {
            total_value += holdings.quantity(ticker) * bar.close;
        }

        for ticker in tickers {
            let quantity = holdings.quantity(ticker);
            if ticker == winner_ticker {
                let target = total_value / winner_close;
                let buy = round_shares((target - quantity).max(0.0));
                rec.advise(ticker, quantity, Action::Buy(buy));
            } else if quantity > 0.0 && contenders.iter().any(|(t, _)| *t == ticker) {
                rec.advise(ticker, quantity, Action::Sell(round_shares(quantity)));
            } else {
                rec.advise(ticker, quantity, Action::DoNothing);
            }
        }

        Ok(rec)
    }
}
