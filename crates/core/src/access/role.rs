//! Tenant membership roles.

use serde::{Deserialize, Serialize};

use rostra_shared::types::{OrgId, UserId};

/// Role of a member inside a sub-organization, ordered by privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Clocks in and out.
    Staff = 0,
    /// Closes and reviews attendance.
    Manager = 1,
    /// Manages the tenant's members.
    Admin = 2,
    /// Owns the tenant.
    Owner = 3,
}

impl MemberRole {
    /// Parse a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "staff" => Some(Self::Staff),
            "manager" => Some(Self::Manager),
            "admin" => Some(Self::Admin),
            "owner" => Some(Self::Owner),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Manager => "manager",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }

    /// Returns true if this role can set `clockOut` and change approval state.
    #[must_use]
    pub fn can_review_attendance(&self) -> bool {
        *self >= Self::Manager
    }

    /// Returns true if this role can add, change or remove members.
    #[must_use]
    pub fn can_manage_members(&self) -> bool {
        *self >= Self::Admin
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership document at `orgs/{orgId}/members/{uid}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    /// Tenant.
    pub org_id: OrgId,
    /// Member.
    pub user_id: UserId,
    /// Role inside the tenant.
    pub role: MemberRole,
}
