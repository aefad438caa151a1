//! Fixed-precision rounding for the accounting boundaries.
//!
//! Share quantities are stored to 3 decimal places, USD amounts to 2. Applied
//! only where values are written into holdings or snapshots, so the
//! conservation invariant (total == cash + sum of subtotals) survives rounding.

/// Round a USD amount to cents.
pub fn round_usd(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round a share quantity to 3 decimal places.
pub fn round_shares(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
