//! Attendance record snapshots and change events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rostra_shared::types::{AttendanceId, OrgId, StaffId, UserId, VenueId};

/// Approval state of an attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// Recorded by staff, awaiting review.
    Pending,
    /// Approved by a manager; billable.
    Approved,
    /// Rejected by a manager.
    Rejected,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// One staff clock-in/out record scoped to a tenant.
///
/// `staff_id` and `clock_in` are required on well-formed records. They are
/// optional here so that malformed snapshots still deserialize and can be
/// skipped with a reason instead of failing delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEvent {
    /// Document id.
    pub id: AttendanceId,
    /// Owning tenant.
    pub org_id: OrgId,
    /// Staff member who worked the shift.
    #[serde(default)]
    pub staff_id: Option<StaffId>,
    /// Venue where the shift was worked.
    pub venue_id: VenueId,
    /// Clock-in time.
    #[serde(default)]
    pub clock_in: Option<DateTime<Utc>>,
    /// Clock-out time, absent until the record is closed.
    #[serde(default)]
    pub clock_out: Option<DateTime<Utc>>,
    /// Approval state.
    pub status: AttendanceStatus,
    /// Approver, once approved.
    #[serde(default)]
    pub approved_by: Option<UserId>,
    /// Approval time, once approved.
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
}

impl AttendanceEvent {
    /// Returns true if the record is approved.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.status == AttendanceStatus::Approved
    }
}

/// A before/after pair delivered by the document-change trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceChange {
    /// Tenant whose attendance collection changed.
    pub tenant_id: OrgId,
    /// Snapshot before the change; absent on creation.
    #[serde(default)]
    pub before: Option<AttendanceEvent>,
    /// Snapshot after the change; absent on deletion.
    #[serde(default)]
    pub after: Option<AttendanceEvent>,
}

impl AttendanceChange {
    /// Returns true if this change moved the record into `approved`.
    ///
    /// A missing `before` snapshot (record created already approved) counts
    /// as a transition.
    #[must_use]
    pub fn becomes_approved(&self) -> bool {
        let now_approved = self.after.as_ref().is_some_and(AttendanceEvent::is_approved);
        let was_approved = self.before.as_ref().is_some_and(AttendanceEvent::is_approved);
        now_approved && !was_approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn event(status: AttendanceStatus) -> AttendanceEvent {
        AttendanceEvent {
            id: AttendanceId::new("att-1").unwrap(),
            org_id: OrgId::new("org-1").unwrap(),
            staff_id: Some(StaffId::new("staff-1").unwrap()),
            venue_id: VenueId::new("venue-1").unwrap(),
            clock_in: Some(Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap()),
            clock_out: Some(Utc.with_ymd_and_hms(2026, 1, 5, 17, 0, 0).unwrap()),
            status,
            approved_by: None,
            approved_at: None,
        }
    }

    fn change(
        before: Option<AttendanceStatus>,
        after: Option<AttendanceStatus>,
    ) -> AttendanceChange {
        AttendanceChange {
            tenant_id: OrgId::new("org-1").unwrap(),
            before: before.map(event),
            after: after.map(event),
        }
    }

    #[test]
    fn test_becomes_approved_transitions() {
        use AttendanceStatus::{Approved, Pending, Rejected};

        assert!(change(Some(Pending), Some(Approved)).becomes_approved());
        assert!(change(Some(Rejected), Some(Approved)).becomes_approved());
        assert!(change(None, Some(Approved)).becomes_approved());

        assert!(!change(Some(Approved), Some(Approved)).becomes_approved());
        assert!(!change(Some(Pending), Some(Pending)).becomes_approved());
        assert!(!change(Some(Approved), Some(Rejected)).becomes_approved());
        assert!(!change(Some(Approved), None).becomes_approved());
        assert!(!change(None, None).becomes_approved());
    }

    #[test]
    fn test_event_wire_format() {
        let value = json!({
            "id": "att-9",
            "orgId": "org-1",
            "staffId": "s-1",
            "venueId": "v-1",
            "clockIn": "2026-01-05T09:00:00Z",
            "status": "approved",
            "approvedBy": "mgr-1"
        });

        let event: AttendanceEvent = serde_json::from_value(value).unwrap();
        assert_eq!(event.id.as_str(), "att-9");
        assert!(event.clock_out.is_none());
        assert!(event.approved_at.is_none());
        assert!(event.is_approved());
    }

    #[test]
    fn test_malformed_event_still_deserializes() {
        let value = json!({
            "id": "att-9",
            "orgId": "org-1",
            "venueId": "v-1",
            "status": "approved"
        });

        let event: AttendanceEvent = serde_json::from_value(value).unwrap();
        assert!(event.staff_id.is_none());
        assert!(event.clock_in.is_none());
    }

    #[test]
    fn test_change_wire_format() {
        let value = json!({
            "tenantId": "org-1",
            "before": null,
            "after": {
                "id": "att-9",
                "orgId": "org-1",
                "venueId": "v-1",
                "status": "pending"
            }
        });

        let change: AttendanceChange = serde_json::from_value(value).unwrap();
        assert!(change.before.is_none());
        assert!(!change.becomes_approved());
    }
}
