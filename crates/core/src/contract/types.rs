//! Billing contract types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use rostra_shared::types::{OrgId, ParentId};

/// Errors raised when interpreting contract data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// Unknown rounding policy string.
    #[error("unknown rounding policy: {0}")]
    UnknownRounding(String),

    /// Unknown billing-period type string.
    #[error("unknown billing period type: {0}")]
    UnknownPeriodType(String),

    /// Bill rate below zero.
    #[error("bill rate must not be negative: {0}")]
    NegativeRate(Decimal),
}

/// How worked minutes are rounded before billing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundingPolicy {
    /// Bill exact minutes.
    #[serde(rename = "none")]
    None,
    /// Round minutes up to the next multiple of 5.
    #[serde(rename = "nearest-5")]
    Nearest5,
    /// Round minutes up to the next multiple of 15.
    #[serde(rename = "nearest-15")]
    Nearest15,
}

impl RoundingPolicy {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Nearest5 => "nearest-5",
            Self::Nearest15 => "nearest-15",
        }
    }

    /// Returns the rounding step in minutes, if the policy rounds.
    #[must_use]
    pub const fn step_minutes(&self) -> Option<i64> {
        match self {
            Self::None => None,
            Self::Nearest5 => Some(5),
            Self::Nearest15 => Some(15),
        }
    }
}

impl std::fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RoundingPolicy {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "nearest-5" => Ok(Self::Nearest5),
            "nearest-15" => Ok(Self::Nearest15),
            _ => Err(ContractError::UnknownRounding(s.to_string())),
        }
    }
}

/// Length of a billing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    /// ISO-8601 week.
    Weekly,
    /// Two ISO weeks counted from a fixed anchor Monday.
    Biweekly,
    /// Calendar month.
    Monthly,
}

impl PeriodType {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        }
    }
}

impl std::fmt::Display for PeriodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PeriodType {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(ContractError::UnknownPeriodType(s.to_string())),
        }
    }
}

/// Billing agreement between a parent and one sub-organization.
///
/// Written only by trusted server-side processes; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    /// Billing parent.
    pub parent_id: ParentId,
    /// Contracted sub-organization.
    pub sub_org_id: OrgId,
    /// Hourly bill rate.
    pub bill_rate: Decimal,
    /// Minute rounding policy.
    pub rounding: RoundingPolicy,
    /// Billing-period type.
    pub period: PeriodType,
}

impl Contract {
    /// Checks the contract's own invariants.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.bill_rate.is_sign_negative() && !self.bill_rate.is_zero() {
            return Err(ContractError::NegativeRate(self.bill_rate));
        }
        Ok(())
    }
}
