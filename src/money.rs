//! Monetary amounts.
//!
//! All amounts in this crate are [`rust_decimal::Decimal`] values in major
//! units (dollars, not cents). Display formatting goes through `rusty-money`.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso};

/// Calculate `percent` of `amount`, rounded half-away-from-zero to cents.
pub fn percent_of(percent: Percentage, amount: Decimal) -> Decimal {
    (percent * amount).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as US dollars, e.g. `$1,234.56`.
pub fn format_usd(amount: Decimal) -> String {
    Money::from_decimal(amount, iso::USD).to_string()
}
