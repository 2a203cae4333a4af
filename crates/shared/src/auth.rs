//! Capability claims carried by authenticated callers.
//!
//! The identity layer issues one of two capabilities. They are modelled as a
//! tagged variant so authorization code matches on them instead of probing
//! optional fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{OrgId, ParentId, UserId};

/// What an authenticated caller is allowed to act as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Capability {
    /// Member of a sub-organization with a role inside it.
    #[serde(rename_all = "camelCase")]
    Member {
        /// Tenant the member belongs to.
        org_id: OrgId,
        /// Role name within the tenant (e.g. "staff", "manager").
        role: String,
    },
    /// Administrator of a parent (billing) organization.
    #[serde(rename_all = "camelCase")]
    ParentAdmin {
        /// The single parent this capability is bound to.
        parent_id: ParentId,
    },
}

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: UserId,
    /// Capability bound to this token.
    pub cap: Capability,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: UserId, capability: Capability, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            cap: capability,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.sub
    }

    /// Returns the capability from claims.
    #[must_use]
    pub const fn capability(&self) -> &Capability {
        &self.cap
    }
}
