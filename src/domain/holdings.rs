//! Portfolio holdings: cash plus fractional share quantities.

use std::collections::HashMap;

/// One portfolio at one point in time. Cash is a USD amount; share quantities
/// are fractional and never negative. Each simulation run owns its own copy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Holdings {
    pub cash: f64,
    shares: HashMap<String, f64>,
}

impl Holdings {
    pub fn new(cash: f64) -> Self {
        Holdings {
            cash,
            shares: HashMap::new(),
        }
    }

    /// Share quantity for a ticker, 0.0 when the ticker is not held.
    pub fn quantity(&self, ticker: &str) -> f64 {
        self.shares.get(ticker).copied().unwrap_or(0.0)
    }

    pub fn set_quantity(&mut self, ticker: &str, quantity: f64) {
        self.shares.insert(ticker.to_string(), quantity);
    }

    /// True when the portfolio holds a positive quantity of the ticker.
    pub fn has_shares(&self, ticker: &str) -> bool {
        self.quantity(ticker) > 0.0
    }

    pub fn shares(&self) -> &HashMap<String, f64> {
        &self.shares
    }

    pub fn position_count(&self) -> usize {
        self.shares.values().filter(|q| **q > 0.0).count()
    }
}
