//! Results of handling one attendance change.

use thiserror::Error;

use crate::ledger::WriteOutcome;
use crate::store::StoreError;

/// Why a change was not billing-relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The attendance record was deleted.
    Deleted,
    /// The change did not move the record into `approved`.
    NotApprovalTransition,
}

impl IgnoreReason {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Deleted => "deleted",
            Self::NotApprovalTransition => "not_approval_transition",
        }
    }
}

/// Why an approval could not be billed. Skips are terminal and never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The record has no `staffId`.
    MissingStaffId,
    /// The record has no `clockIn`.
    MissingClockIn,
    /// The record was approved without a `clockOut`.
    MissingClockOut,
    /// `clockOut` precedes `clockIn`.
    ClockOutBeforeClockIn,
    /// The tenant is not under any billing parent.
    NoParentMapping,
    /// The parent has no contract with the tenant.
    NoContract,
    /// The contract exists but cannot be used.
    InvalidContract,
    /// The snapshot's `orgId` is not the delivering tenant.
    TenantMismatch,
    /// The line amount is not representable.
    AmountOverflow,
    /// Storage permanently refused the ledger line.
    WriteRejected,
}

impl SkipReason {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingStaffId => "missing_staff_id",
            Self::MissingClockIn => "missing_clock_in",
            Self::MissingClockOut => "missing_clock_out",
            Self::ClockOutBeforeClockIn => "clock_out_before_clock_in",
            Self::NoParentMapping => "no_parent_mapping",
            Self::NoContract => "no_contract",
            Self::InvalidContract => "invalid_contract",
            Self::TenantMismatch => "tenant_mismatch",
            Self::AmountOverflow => "amount_overflow",
            Self::WriteRejected => "write_rejected",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal result of handling a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplicationOutcome {
    /// Not billing-relevant.
    Ignored(IgnoreReason),
    /// Billing-relevant but unbillable.
    Skipped(SkipReason),
    /// A line was created, or already existed.
    Written(WriteOutcome),
}

/// Failures the trigger should redeliver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplicationError {
    /// A storage read or write failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ReplicationError {
    /// Returns true if redelivering the change may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Store(e) => e.is_retryable(),
        }
    }
}
