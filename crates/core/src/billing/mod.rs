//! Billing arithmetic for ledger lines.
//!
//! All values are `Decimal`; floating point never touches hours or money.
//! - `hours` - Billable hours under a rounding policy
//! - `period` - Billing-period identifiers
//! - `amount` - Line amount rounding

pub mod amount;
pub mod error;
pub mod hours;
pub mod period;

#[cfg(test)]
mod hours_props;
#[cfg(test)]
mod period_props;

pub use amount::{AMOUNT_LIMIT, AMOUNT_SCALE, line_amount};
pub use error::BillingError;
pub use hours::{billable_hours, billed_minutes, raw_minutes};
pub use period::PeriodDeriver;
