//! Ledger lines as stored under a parent's ledger period.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rostra_shared::types::{
    AttendanceId, LedgerLineId, OrgId, ParentId, PeriodId, StaffRef, VenueId,
};

use crate::billing::{BillingError, line_amount};

/// One billable line in `parents/{parentId}/ledgers/{periodId}/lines`.
///
/// Lines are append-only. Nothing in this crate mutates a stored line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerLine {
    /// Deterministic key derived from parent, period and source record.
    pub line_id: LedgerLineId,
    /// Billing parent.
    pub parent_id: ParentId,
    /// Sub-organization the work was done for.
    pub sub_org_id: OrgId,
    /// Pseudonymous staff reference.
    pub staff_ref: StaffRef,
    /// Venue of the shift.
    pub venue_id: VenueId,
    /// Ledger period.
    pub period_id: PeriodId,
    /// Billed hours after rounding.
    pub hours: Decimal,
    /// Hourly rate from the contract.
    pub bill_rate: Decimal,
    /// `hours × bill_rate`, rounded to cents.
    pub amount: Decimal,
    /// Attendance record this line was replicated from.
    pub source_attendance_id: AttendanceId,
    /// Replication time.
    pub created_at: DateTime<Utc>,
}

impl LedgerLine {
    /// Storage path of this line.
    #[must_use]
    pub fn path(&self) -> String {
        format!(
            "parents/{}/ledgers/{}/lines/{}",
            self.parent_id, self.period_id, self.line_id
        )
    }
}

/// A line before its key, amount and timestamp are fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerCandidate {
    /// Billing parent.
    pub parent_id: ParentId,
    /// Sub-organization the work was done for.
    pub sub_org_id: OrgId,
    /// Pseudonymous staff reference.
    pub staff_ref: StaffRef,
    /// Venue of the shift.
    pub venue_id: VenueId,
    /// Ledger period.
    pub period_id: PeriodId,
    /// Billed hours after rounding.
    pub hours: Decimal,
    /// Hourly rate from the contract.
    pub bill_rate: Decimal,
    /// Attendance record being replicated.
    pub source_attendance_id: AttendanceId,
}

impl LedgerCandidate {
    /// Key the line will be stored under.
    #[must_use]
    pub fn line_id(&self) -> LedgerLineId {
        LedgerLineId::derive(&self.parent_id, &self.period_id, &self.source_attendance_id)
    }

    /// Prices the candidate and stamps it with `created_at`.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::AmountOverflow` if the amount is not representable.
    pub fn into_line(self, created_at: DateTime<Utc>) -> Result<LedgerLine, BillingError> {
        let amount = line_amount(self.hours, self.bill_rate)?;
        Ok(LedgerLine {
            line_id: self.line_id(),
            parent_id: self.parent_id,
            sub_org_id: self.sub_org_id,
            staff_ref: self.staff_ref,
            venue_id: self.venue_id,
            period_id: self.period_id,
            hours: self.hours,
            bill_rate: self.bill_rate,
            amount,
            source_attendance_id: self.source_attendance_id,
            created_at,
        })
    }
}
