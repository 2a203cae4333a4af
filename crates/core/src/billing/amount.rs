//! Monetary amount of a ledger line.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::billing::error::BillingError;

/// Decimal places of a billed amount.
pub const AMOUNT_SCALE: u32 = 2;

/// Exclusive bound on a billed amount's magnitude: `NUMERIC(19, 2)` keeps 17
/// integer digits.
pub const AMOUNT_LIMIT: i64 = 100_000_000_000_000_000;

/// `hours × rate`, rounded half away from zero to [`AMOUNT_SCALE`] places.
///
/// # Errors
///
/// Returns `BillingError::AmountOverflow` if the product is not representable
/// or its magnitude reaches [`AMOUNT_LIMIT`].
pub fn line_amount(hours: Decimal, rate: Decimal) -> Result<Decimal, BillingError> {
    let overflow = BillingError::AmountOverflow { hours, rate };
    let amount = hours
        .checked_mul(rate)
        .ok_or_else(|| overflow.clone())?
        .round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);

    if amount.abs() >= Decimal::from(AMOUNT_LIMIT) {
        return Err(overflow);
    }
    Ok(amount)
}
