//! Decimal formatting for amounts and USD values.
//!
//! USD arithmetic goes through `rust_decimal::Decimal` so `0.1 * 3` style
//! float artifacts never reach the 2-decimal output.

use rust_decimal::prelude::*;

/// Format a `Decimal` with exactly `dp` fractional digits (half away from zero).
pub fn fixed(value: &Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

/// `amount × price`, formatted to 2 decimal places. Non-finite inputs count as zero.
pub fn usd_value(amount: f64, price: f64) -> String {
    let amount = Decimal::from_f64(amount).unwrap_or_default();
    let price = Decimal::from_f64(price).unwrap_or_default();
    let product = amount.checked_mul(price).unwrap_or_default();
    fixed(&product, 2)
}

/// Parse a decimal string produced by this crate (amounts, USD values).
pub fn parse(value: &str) -> Option<Decimal> {
    Decimal::from_str(value.trim()).ok()
}

/// `"1250.00"` → `"$1,250.00"`. Unparseable input is returned unchanged.
pub fn usd_display(value: &str) -> String {
    match parse(value) {
        Some(d) => {
            let s = fixed(&d.abs(), 2);
            let sign = if d.is_sign_negative() && !d.is_zero() { "-" } else { "" };
            format!("{}${}", sign, super::num::group_thousands(&s))
        }
        None => value.to_string(),
    }
}
