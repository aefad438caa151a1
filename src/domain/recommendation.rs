//! Advisor recommendations: one action per ticker per day.

use std::collections::HashMap;

/// What an advisor wants done with one ticker today. Trade quantities are in
/// shares and sized by the advisor, not re-derived by the applier.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    DoNothing,
    Hold,
    Sell(f64),
    Buy(f64),
    /// Reserved. No order is placed; the position is carried and valued.
    LimitBuy(f64),
}

/// Per-ticker advice: the share quantity before today's action, plus the action.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerAdvice {
    pub prev_quantity: f64,
    pub action: Action,
}

/// One day's full recommendation set. Cash is passed through unchanged from
/// the advisor's input and represents cash before today's trades. Produced
/// fresh each simulated day, consumed once by the applier.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub cash: f64,
    entries: HashMap<String, TickerAdvice>,
}

impl Recommendation {
    pub fn new(cash: f64) -> Self {
        Recommendation {
            cash,
            entries: HashMap::new(),
        }
    }

    pub fn advise(&mut self, ticker: &str, prev_quantity: f64, action: Action) {
        self.entries.insert(
            ticker.to_string(),
            TickerAdvice {
                prev_quantity,
                action,
            },
        );
    }

    pub fn get(&self, ticker: &str) -> Option<&TickerAdvice> {
        self.entries.get(ticker)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &TickerAdvice)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
