//! Billing contracts and their resolution.
//!
//! - `types` - Contract, rounding policy, and billing-period type
//! - `resolver` - Sub-organization → parent → contract lookup

pub mod resolver;
pub mod types;

pub use resolver::{ContractResolver, Resolution};
pub use types::{Contract, ContractError, PeriodType, RoundingPolicy};
