//! Write rules for attendance records.
//!
//! Clients write attendance documents directly, so these rules are part of
//! the isolation boundary rather than the replication pipeline.
//! - `staffId` is immutable after creation
//! - `clockOut`, once present, is never before `clockIn`
//! - only managers and above close records or change their status
//! - records are never deleted by clients

use thiserror::Error;

use crate::access::MemberRole;
use crate::attendance::types::{AttendanceEvent, AttendanceStatus};

/// Violations of the attendance write rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttendanceError {
    /// The update changed `staffId`.
    #[error("staffId is immutable")]
    StaffIdChanged,

    /// The update moved the record to another tenant or document id.
    #[error("record identity is immutable")]
    IdentityChanged,

    /// `clockOut` precedes `clockIn`.
    #[error("clockOut must not precede clockIn")]
    ClockOutBeforeClockIn,

    /// A new record was not created as pending with staff and clock-in set.
    #[error("new records must be pending with staffId and clockIn")]
    InvalidCreate,

    /// The caller's role may not make this change.
    #[error("role {role} may not {action}")]
    RoleNotPermitted {
        /// Caller's role.
        role: MemberRole,
        /// What was attempted.
        action: &'static str,
    },
}

fn check_interval(event: &AttendanceEvent) -> Result<(), AttendanceError> {
    match (event.clock_in, event.clock_out) {
        (Some(clock_in), Some(clock_out)) if clock_out < clock_in => {
            Err(AttendanceError::ClockOutBeforeClockIn)
        }
        (None, Some(_)) => Err(AttendanceError::ClockOutBeforeClockIn),
        _ => Ok(()),
    }
}

/// Validates a record created by a tenant member.
pub fn validate_create(event: &AttendanceEvent) -> Result<(), AttendanceError> {
    if event.status != AttendanceStatus::Pending
        || event.staff_id.is_none()
        || event.clock_in.is_none()
        || event.approved_by.is_some()
    {
        return Err(AttendanceError::InvalidCreate);
    }
    check_interval(event)
}

/// Validates an update from `before` to `after` made by a member with `role`.
pub fn validate_update(
    before: &AttendanceEvent,
    after: &AttendanceEvent,
    role: MemberRole,
) -> Result<(), AttendanceError> {
    if before.id != after.id || before.org_id != after.org_id {
        return Err(AttendanceError::IdentityChanged);
    }
    if before.staff_id != after.staff_id {
        return Err(AttendanceError::StaffIdChanged);
    }
    check_interval(after)?;

    let closes_or_reviews = before.clock_out != after.clock_out
        || before.status != after.status
        || before.approved_by != after.approved_by
        || before.approved_at != after.approved_at;

    if closes_or_reviews && !role.can_review_attendance() {
        return Err(AttendanceError::RoleNotPermitted {
            role,
            action: "close or review attendance",
        });
    }

    if before.status != AttendanceStatus::Pending && !role.can_review_attendance() {
        return Err(AttendanceError::RoleNotPermitted {
            role,
            action: "edit a reviewed record",
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rostra_shared::types::{AttendanceId, OrgId, StaffId, UserId, VenueId};

    fn pending() -> AttendanceEvent {
        AttendanceEvent {
            id: AttendanceId::new("att-1").unwrap(),
            org_id: OrgId::new("org-1").unwrap(),
            staff_id: Some(StaffId::new("staff-1").unwrap()),
            venue_id: VenueId::new("venue-1").unwrap(),
            clock_in: Some(Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap()),
            clock_out: None,
            status: AttendanceStatus::Pending,
            approved_by: None,
            approved_at: None,
        }
    }

    fn approved(from: &AttendanceEvent) -> AttendanceEvent {
        let mut after = from.clone();
        after.clock_out = Some(Utc.with_ymd_and_hms(2026, 1, 5, 17, 0, 0).unwrap());
        after.status = AttendanceStatus::Approved;
        after.approved_by = Some(UserId::new("mgr-1").unwrap());
        after.approved_at = Some(Utc.with_ymd_and_hms(2026, 1, 6, 8, 0, 0).unwrap());
        after
    }

    #[test]
    fn test_create_requires_pending_with_staff_and_clock_in() {
        assert!(validate_create(&pending()).is_ok());

        let mut no_staff = pending();
        no_staff.staff_id = None;
        assert_eq!(validate_create(&no_staff), Err(AttendanceError::InvalidCreate));

        let mut pre_approved = pending();
        pre_approved.status = AttendanceStatus::Approved;
        assert_eq!(
            validate_create(&pre_approved),
            Err(AttendanceError::InvalidCreate)
        );
    }

    #[test]
    fn test_manager_can_approve() {
        let before = pending();
        let after = approved(&before);
        assert!(validate_update(&before, &after, MemberRole::Manager).is_ok());
        assert!(validate_update(&before, &after, MemberRole::Owner).is_ok());
    }

    #[test]
    fn test_staff_cannot_approve() {
        let before = pending();
        let after = approved(&before);
        assert!(matches!(
            validate_update(&before, &after, MemberRole::Staff),
            Err(AttendanceError::RoleNotPermitted { .. })
        ));
    }

    #[test]
    fn test_staff_id_immutable_for_every_role() {
        let before = pending();
        let mut after = before.clone();
        after.staff_id = Some(StaffId::new("staff-2").unwrap());

        for role in [
            MemberRole::Staff,
            MemberRole::Manager,
            MemberRole::Admin,
            MemberRole::Owner,
        ] {
            assert_eq!(
                validate_update(&before, &after, role),
                Err(AttendanceError::StaffIdChanged)
            );
        }
    }

    #[test]
    fn test_clock_out_before_clock_in_rejected() {
        let before = pending();
        let mut after = before.clone();
        after.clock_out = Some(Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap());

        assert_eq!(
            validate_update(&before, &after, MemberRole::Admin),
            Err(AttendanceError::ClockOutBeforeClockIn)
        );
    }

    #[test]
    fn test_staff_cannot_edit_reviewed_record() {
        let before = approved(&pending());
        let mut after = before.clone();
        after.venue_id = VenueId::new("venue-2").unwrap();

        assert!(validate_update(&before, &after, MemberRole::Staff).is_err());
        assert!(validate_update(&before, &after, MemberRole::Manager).is_ok());
    }

    #[test]
    fn test_moving_record_between_tenants_rejected() {
        let before = pending();
        let mut after = before.clone();
        after.org_id = OrgId::new("org-2").unwrap();

        assert_eq!(
            validate_update(&before, &after, MemberRole::Owner),
            Err(AttendanceError::IdentityChanged)
        );
    }
}
