//! Monetary helpers.
//!
//! Prices are exact decimals. Rounding happens once, on aggregates that are
//! reported to users; intermediate products and sums stay unrounded.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places used for reported money values.
pub const MONEY_SCALE: u32 = 2;

/// Round a money value to [`MONEY_SCALE`] places, half-up.
///
/// Values handled here are non-negative in a consistent ledger, where
/// "away from zero" and "half-up" coincide. The result always carries exactly
/// [`MONEY_SCALE`] places so it displays as `60.00`, not `60`.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// `quantity * unit_price`, or `None` on overflow.
pub fn extend_price(quantity: i64, unit_price: Decimal) -> Option<Decimal> {
    Decimal::from(quantity).checked_mul(unit_price)
}
