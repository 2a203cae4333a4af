//! Billing computation errors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use rostra_shared::types::IdError;

/// Errors that can occur while computing billable values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    /// Clock-out precedes clock-in.
    #[error("clock-out precedes clock-in")]
    ClockOutBeforeClockIn,

    /// The biweekly anchor is not a Monday.
    #[error("biweekly anchor {0} is not a Monday")]
    AnchorNotMonday(NaiveDate),

    /// A derived date fell outside the supported calendar range.
    #[error("date out of range")]
    DateOutOfRange,

    /// `hours × rate` exceeded decimal precision.
    #[error("amount overflow: {hours} hours at {rate}")]
    AmountOverflow {
        /// Billable hours.
        hours: Decimal,
        /// Hourly rate.
        rate: Decimal,
    },

    /// A derived period id was not a valid identifier.
    #[error("invalid period id: {0}")]
    InvalidPeriodId(#[from] IdError),
}
