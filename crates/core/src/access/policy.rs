//! The authorization policy for client access to stored documents.
//!
//! | Resource | Member of the org | Parent admin of the parent |
//! |----------|-------------------|----------------------------|
//! | `orgs/{o}` | read | - |
//! | `orgs/{o}/attendance/{id}` | read; writes per record rules | - |
//! | `orgs/{o}/members/{uid}` | read; admin+ writes | - |
//! | other `orgs/{o}/**` | read, write | - |
//! | `parents/{p}/contracts/{s}` | - | read |
//! | `parents/{p}/ledgers/{period}/lines/**` | - | read |
//!
//! Member access additionally requires the membership document to exist.
//! Attendance writes go through [`AccessPolicy::authorize_attendance_write`],
//! which checks the new record against the stored one.

use std::sync::Arc;

use tracing::debug;

use rostra_shared::types::OrgId;

use crate::access::error::AccessError;
use crate::access::principal::Principal;
use crate::access::resource::{Operation, Resource};
use crate::access::role::MemberRole;
use crate::attendance::{AttendanceEvent, validate_create, validate_update};
use crate::store::MembershipStore;

/// Decides whether a principal may perform an operation on a resource.
#[derive(Clone)]
pub struct AccessPolicy {
    memberships: Arc<dyn MembershipStore>,
}

impl AccessPolicy {
    /// Creates a policy that checks membership documents in `memberships`.
    #[must_use]
    pub fn new(memberships: Arc<dyn MembershipStore>) -> Self {
        Self { memberships }
    }

    /// Authorizes `op` on `resource` for `principal`.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::Denied` when the request is not allowed, and
    /// `AccessError::Store` when membership could not be checked.
    pub async fn authorize(
        &self,
        principal: &Principal,
        op: Operation,
        resource: &Resource,
    ) -> Result<(), AccessError> {
        let result = self.decide(principal, op, resource).await;
        if let Err(e) = &result {
            debug!(uid = %principal.uid(), ?op, ?resource, error = %e, "Access denied");
        }
        result
    }

    /// Authorizes a client write of `after`, replacing `before` when the
    /// record already exists.
    ///
    /// The caller's role is read from the stored membership, not the token.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::InvalidWrite` when the change breaks the
    /// attendance write rules, and `AccessError::Denied` or
    /// `AccessError::Store` as for [`Self::authorize`].
    pub async fn authorize_attendance_write(
        &self,
        principal: &Principal,
        before: Option<&AttendanceEvent>,
        after: &AttendanceEvent,
    ) -> Result<(), AccessError> {
        let result = self.decide_attendance_write(principal, before, after).await;
        if let Err(e) = &result {
            debug!(uid = %principal.uid(), attendance_id = %after.id, error = %e, "Attendance write denied");
        }
        result
    }

    async fn decide_attendance_write(
        &self,
        principal: &Principal,
        before: Option<&AttendanceEvent>,
        after: &AttendanceEvent,
    ) -> Result<(), AccessError> {
        let role = self.member_role(principal, &after.org_id).await?;
        match before {
            Some(before) => validate_update(before, after, role)?,
            None => validate_create(after)?,
        }
        Ok(())
    }

    async fn decide(
        &self,
        principal: &Principal,
        op: Operation,
        resource: &Resource,
    ) -> Result<(), AccessError> {
        match resource {
            Resource::Unknown => Err(AccessError::Denied("unknown path")),

            Resource::LedgerLines { parent_id, .. } => {
                if op.is_write() {
                    return Err(AccessError::Denied("ledger lines are append-only"));
                }
                match principal {
                    Principal::ParentAdmin { parent_id: own, .. } if own == parent_id => Ok(()),
                    Principal::ParentAdmin { .. } => {
                        Err(AccessError::Denied("ledger belongs to another parent"))
                    }
                    Principal::Member { .. } => {
                        Err(AccessError::Denied("members cannot read parent ledgers"))
                    }
                }
            }

            Resource::Contract { parent_id, .. } => {
                if op.is_write() {
                    return Err(AccessError::Denied("contracts are server-managed"));
                }
                match principal {
                    Principal::ParentAdmin { parent_id: own, .. } if own == parent_id => Ok(()),
                    Principal::ParentAdmin { .. } => {
                        Err(AccessError::Denied("contract belongs to another parent"))
                    }
                    Principal::Member { .. } => {
                        Err(AccessError::Denied("members cannot read contracts"))
                    }
                }
            }

            Resource::Org { org_id } => {
                if op.is_write() {
                    return Err(AccessError::Denied("organizations are server-managed"));
                }
                self.member_role(principal, org_id).await.map(|_| ())
            }

            Resource::Attendance { org_id, .. } => match op {
                Operation::Read => self.member_role(principal, org_id).await.map(|_| ()),
                Operation::Delete => Err(AccessError::Denied("attendance is never deleted")),
                Operation::Create | Operation::Update => Err(AccessError::Denied(
                    "attendance writes are checked against the record",
                )),
            },

            Resource::Member { org_id, .. } => {
                let role = self.member_role(principal, org_id).await?;
                if op.is_write() && !role.can_manage_members() {
                    return Err(AccessError::Denied("only admins manage members"));
                }
                Ok(())
            }

            Resource::OrgDocument { org_id } => self.member_role(principal, org_id).await.map(|_| ()),
        }
    }

    /// Role of `principal` in `org_id`, from the stored membership document.
    ///
    /// Fails closed: a missing document denies.
    async fn member_role(
        &self,
        principal: &Principal,
        org_id: &OrgId,
    ) -> Result<MemberRole, AccessError> {
        let Principal::Member {
            uid, org_id: own, ..
        } = principal
        else {
            return Err(AccessError::Denied("parent admins cannot access tenant documents"));
        };
        if own != org_id {
            return Err(AccessError::Denied("document belongs to another tenant"));
        }

        let membership = self
            .memberships
            .membership(org_id, uid)
            .await?
            .ok_or(AccessError::Denied("membership not found"))?;
        if &membership.org_id != org_id || &membership.user_id != uid {
            return Err(AccessError::Denied("membership does not match caller"));
        }
        Ok(membership.role)
    }
}
