//! Billable hours from clock-in/clock-out timestamps.
//!
//! Rounding policies always round worked minutes UP to the next step, never
//! to nearest.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;

use crate::billing::error::BillingError;
use crate::contract::RoundingPolicy;

const MILLIS_PER_MINUTE: Decimal = Decimal::from_parts(60_000, 0, 0, false, 0);
const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Worked minutes between two instants, at millisecond precision.
pub fn raw_minutes(
    clock_in: DateTime<Utc>,
    clock_out: DateTime<Utc>,
) -> Result<Decimal, BillingError> {
    let elapsed = clock_out - clock_in;
    if elapsed < TimeDelta::zero() {
        return Err(BillingError::ClockOutBeforeClockIn);
    }
    Ok(Decimal::from(elapsed.num_milliseconds()) / MILLIS_PER_MINUTE)
}

/// Minutes after applying `policy` to `raw`.
#[must_use]
pub fn billed_minutes(raw: Decimal, policy: RoundingPolicy) -> Decimal {
    match policy.step_minutes() {
        None => raw,
        Some(step) => {
            let step = Decimal::from(step);
            (raw / step).ceil() * step
        }
    }
}

/// Billable hours for a closed attendance interval.
///
/// # Errors
///
/// Returns `BillingError::ClockOutBeforeClockIn` for a negative interval.
pub fn billable_hours(
    clock_in: DateTime<Utc>,
    clock_out: DateTime<Utc>,
    policy: RoundingPolicy,
) -> Result<Decimal, BillingError> {
    let raw = raw_minutes(clock_in, clock_out)?;
    Ok((billed_minutes(raw, policy) / MINUTES_PER_HOUR).normalize())
}
