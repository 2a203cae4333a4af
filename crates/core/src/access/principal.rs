//! Authenticated callers.

use rostra_shared::auth::{Capability, Claims};
use rostra_shared::types::{OrgId, ParentId, UserId};

use crate::access::error::AccessError;
use crate::access::role::MemberRole;

/// An authenticated caller, as seen by the authorization policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// Member of one sub-organization.
    Member {
        /// Caller.
        uid: UserId,
        /// Tenant named by the token.
        org_id: OrgId,
        /// Role named by the token.
        role: MemberRole,
    },
    /// Administrator bound to one parent organization.
    ParentAdmin {
        /// Caller.
        uid: UserId,
        /// The only parent this caller may read.
        parent_id: ParentId,
    },
}

impl Principal {
    /// Builds a principal from verified token claims.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::UnknownRole` if a member token names an unknown role.
    pub fn from_claims(claims: &Claims) -> Result<Self, AccessError> {
        let uid = claims.user_id().clone();
        match claims.capability() {
            Capability::Member { org_id, role } => {
                let role = MemberRole::parse(role)
                    .ok_or_else(|| AccessError::UnknownRole(role.clone()))?;
                Ok(Self::Member {
                    uid,
                    org_id: org_id.clone(),
                    role,
                })
            }
            Capability::ParentAdmin { parent_id } => Ok(Self::ParentAdmin {
                uid,
                parent_id: parent_id.clone(),
            }),
        }
    }

    /// Caller's user id.
    #[must_use]
    pub const fn uid(&self) -> &UserId {
        match self {
            Self::Member { uid, .. } | Self::ParentAdmin { uid, .. } => uid,
        }
    }
}
