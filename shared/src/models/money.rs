//! Money helpers
//!
//! Amounts travel as [`Decimal`] and are stored as integer cents.
//! Precision is fixed at 18 digits with 2 fractional, so the integer part
//! may hold at most 16 digits.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::borrow::Cow;
use validator::ValidationError;

/// Fractional digits kept for every monetary amount
pub const MONEY_SCALE: u32 = 2;

/// Integer digits allowed before the decimal point
pub const MONEY_INTEGER_DIGITS: u32 = 16;

/// Upper bound (exclusive) for any monetary amount: 10^16
fn money_limit() -> Decimal {
    Decimal::from(10_i64.pow(MONEY_INTEGER_DIGITS))
}

/// Round to the stored scale, half away from zero
pub fn normalize(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        MONEY_SCALE,
        rust_decimal::RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Convert an amount to integer cents, `None` if it does not fit
pub fn to_cents(amount: Decimal) -> Option<i64> {
    (normalize(amount) * Decimal::ONE_HUNDRED).to_i64()
}

/// Convert stored cents back to an amount with scale 2
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, MONEY_SCALE)
}

/// `validator` custom rule: non-negative and within (18,2) precision
pub fn validate_money(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::new("money_negative")
            .with_message(Cow::Borrowed("must not be negative")));
    }
    if *amount >= money_limit() {
        return Err(ValidationError::new("money_precision").with_message(Cow::Owned(format!(
            "must have at most {MONEY_INTEGER_DIGITS} integer digits"
        ))));
    }
    Ok(())
}
