//! Recommendation applier: the accounting state machine.
//!
//! A pure transition function over one day's recommendation set. The applier
//! trusts the advisor's (previous quantity, action, trade quantity) tuple:
//! sizing policy belongs to advisors, bookkeeping belongs here. Preconditions
//! documented on [`Action`]: a Sell must not exceed the held quantity and a
//! Buy is the advisor's responsibility to fund — overdraft produces negative
//! cash rather than a runtime failure, so it stays detectable end to end.

use chrono::NaiveDate;
use log::warn;

use super::holdings::Holdings;
use super::recommendation::{Action, Recommendation};
use super::rounding::{round_shares, round_usd};
use crate::ports::price_port::PricePort;

/// Apply one day's recommendation set, producing the next holdings state and
/// the total portfolio value in USD.
///
/// Tickers with no bar on `date` are carried forward unchanged and excluded
/// from the day's valuation (logged, not fatal).
pub fn apply_recommendation(
    store: &dyn PricePort,
    date: NaiveDate,
    rec: &Recommendation,
) -> (Holdings, f64) {
    let mut cash = rec.cash;
    let mut total_value_usd = 0.0;
    let mut next = Holdings::new(0.0);

    for (ticker, advice) in rec.entries() {
        let Some(bar) = store.bar(ticker, date) else {
            warn!("no price bar for {ticker} on {date}, carrying position forward");
            next.set_quantity(ticker, round_shares(advice.prev_quantity));
            continue;
        };
        let close = bar.close;

        match advice.action {
            Action::DoNothing | Action::Hold => {
                let quantity = round_shares(advice.prev_quantity);
                next.set_quantity(ticker, quantity);
                total_value_usd += quantity * close;
            }
            Action::Sell(trade_quantity) => {
                let remaining = round_shares(advice.prev_quantity - trade_quantity);
                cash += trade_quantity * close;
                next.set_quantity(ticker, remaining);
                total_value_usd += remaining * close;
            }
            Action::Buy(trade_quantity) => {
                let quantity = round_shares(advice.prev_quantity + trade_quantity);
                cash -= trade_quantity * close;
                next.set_quantity(ticker, quantity);
                total_value_usd += quantity * close;
            }
            Action::LimitBuy(_) => {
                // Reserved: no order executes, the position is carried and valued.
                let quantity = round_shares(advice.prev_quantity);
                next.set_quantity(ticker, quantity);
                total_value_usd += quantity * close;
            }
        }
    }

    next.cash = round_usd(cash);
    let total = round_usd(total_value_usd + next.cash);
    (next, total)
}
