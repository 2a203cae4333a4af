//! Replicates approved attendance into the parent's ledger.
//!
//! Delivery is at-least-once, unordered and may race with itself, so the
//! handler is a pure function of the change plus stored configuration, and
//! its only side effect is one create-if-absent ledger write.

use tracing::{debug, info, warn};

use rostra_shared::types::StaffRef;

use crate::attendance::AttendanceChange;
use crate::billing::{PeriodDeriver, billable_hours};
use crate::contract::{ContractResolver, Resolution};
use crate::ledger::{LedgerCandidate, LedgerError, LedgerWriter, WriteOutcome};
use crate::replication::outcome::{
    IgnoreReason, ReplicationError, ReplicationOutcome, SkipReason,
};
use crate::store::StoreError;

/// Drives contract resolution, billing arithmetic and the ledger write.
#[derive(Clone)]
pub struct ReplicationOrchestrator {
    resolver: ContractResolver,
    deriver: PeriodDeriver,
    writer: LedgerWriter,
}

impl ReplicationOrchestrator {
    /// Creates an orchestrator from its collaborators.
    #[must_use]
    pub fn new(resolver: ContractResolver, deriver: PeriodDeriver, writer: LedgerWriter) -> Self {
        Self {
            resolver,
            deriver,
            writer,
        }
    }

    /// Handles one attendance change.
    ///
    /// Deletions and non-approval changes are ignored. Malformed records,
    /// missing configuration and permanently refused writes are skipped with
    /// exactly one warning. Only other storage failures are returned as errors.
    pub async fn handle(
        &self,
        change: &AttendanceChange,
    ) -> Result<ReplicationOutcome, ReplicationError> {
        let tenant_id = &change.tenant_id;

        let Some(after) = change.after.as_ref() else {
            debug!(%tenant_id, "Attendance deleted, ignoring");
            return Ok(ReplicationOutcome::Ignored(IgnoreReason::Deleted));
        };
        let attendance_id = &after.id;

        if !change.becomes_approved() {
            debug!(%tenant_id, %attendance_id, status = %after.status, "Not an approval transition, ignoring");
            return Ok(ReplicationOutcome::Ignored(IgnoreReason::NotApprovalTransition));
        }

        let skip = |reason: SkipReason| -> Result<ReplicationOutcome, ReplicationError> {
            warn!(%reason, %tenant_id, %attendance_id, "Skipping attendance replication");
            Ok(ReplicationOutcome::Skipped(reason))
        };

        if after.org_id != *tenant_id {
            return skip(SkipReason::TenantMismatch);
        }
        let Some(staff_id) = after.staff_id.as_ref() else {
            return skip(SkipReason::MissingStaffId);
        };
        let Some(clock_in) = after.clock_in else {
            return skip(SkipReason::MissingClockIn);
        };
        // Never substitute "now" for a missing clock-out.
        let Some(clock_out) = after.clock_out else {
            return skip(SkipReason::MissingClockOut);
        };
        if clock_out < clock_in {
            return skip(SkipReason::ClockOutBeforeClockIn);
        }

        let (parent_id, contract) = match self.resolver.resolve(tenant_id).await? {
            Resolution::Resolved {
                parent_id,
                contract,
            } => (parent_id, contract),
            Resolution::NoParent => return skip(SkipReason::NoParentMapping),
            Resolution::NoContract { parent_id } => {
                debug!(%parent_id, "No contract under parent");
                return skip(SkipReason::NoContract);
            }
            Resolution::InvalidContract { parent_id, reason } => {
                debug!(%parent_id, %reason, "Contract rejected");
                return skip(SkipReason::InvalidContract);
            }
        };

        let Ok(hours) = billable_hours(clock_in, clock_out, contract.rounding) else {
            return skip(SkipReason::ClockOutBeforeClockIn);
        };
        let period_id = match self.deriver.period_id(clock_in, contract.period) {
            Ok(period_id) => period_id,
            Err(e) => {
                debug!(error = %e, "Cannot derive billing period");
                return skip(SkipReason::InvalidContract);
            }
        };

        let candidate = LedgerCandidate {
            parent_id,
            sub_org_id: tenant_id.clone(),
            staff_ref: StaffRef::pseudonymize(tenant_id, staff_id),
            venue_id: after.venue_id.clone(),
            period_id,
            hours,
            bill_rate: contract.bill_rate,
            source_attendance_id: attendance_id.clone(),
        };

        match self.writer.write(candidate).await {
            Ok(outcome) => {
                if let WriteOutcome::Created(line) = &outcome {
                    info!(
                        %tenant_id,
                        %attendance_id,
                        path = %line.path(),
                        hours = %line.hours,
                        "Attendance replicated to ledger"
                    );
                }
                Ok(ReplicationOutcome::Written(outcome))
            }
            Err(LedgerError::Billing(e)) => {
                debug!(error = %e, "Cannot price ledger line");
                skip(SkipReason::AmountOverflow)
            }
            Err(LedgerError::Store(StoreError::Rejected(reason))) => {
                debug!(%reason, "Storage refused ledger line");
                skip(SkipReason::WriteRejected)
            }
            Err(LedgerError::Store(e)) => {
                warn!(%tenant_id, %attendance_id, error = %e, retryable = e.is_retryable(), "Ledger write failed");
                Err(ReplicationError::Store(e))
            }
        }
    }
}
