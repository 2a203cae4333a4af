//! Storage paths the authorization policy understands.

use rostra_shared::types::{AttendanceId, LedgerLineId, OrgId, ParentId, PeriodId, UserId};

/// Kind of access requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Get or list.
    Read,
    /// Create a new document.
    Create,
    /// Change an existing document.
    Update,
    /// Remove a document.
    Delete,
}

impl Operation {
    /// Returns true for create, update and delete.
    #[must_use]
    pub const fn is_write(&self) -> bool {
        !matches!(self, Self::Read)
    }
}

/// A document or collection addressed by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// `orgs/{orgId}`
    Org {
        /// Tenant.
        org_id: OrgId,
    },
    /// `orgs/{orgId}/attendance/{id}`
    Attendance {
        /// Tenant.
        org_id: OrgId,
        /// Attendance record.
        attendance_id: AttendanceId,
    },
    /// `orgs/{orgId}/members/{uid}`
    Member {
        /// Tenant.
        org_id: OrgId,
        /// Member.
        user_id: UserId,
    },
    /// Any other path below `orgs/{orgId}/`.
    OrgDocument {
        /// Tenant.
        org_id: OrgId,
    },
    /// `parents/{parentId}/contracts/{subOrgId}`
    Contract {
        /// Billing parent.
        parent_id: ParentId,
        /// Contracted sub-organization.
        sub_org_id: OrgId,
    },
    /// `parents/{parentId}/ledgers/{periodId}/lines[/{lineId}]`
    LedgerLines {
        /// Billing parent.
        parent_id: ParentId,
        /// Ledger period.
        period_id: PeriodId,
        /// A single line, or the whole collection.
        line_id: Option<LedgerLineId>,
    },
    /// Anything else. Always denied.
    Unknown,
}

impl Resource {
    /// Classifies a slash-separated storage path.
    ///
    /// Segments that are not valid identifiers make the whole path `Unknown`.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        Self::from_segments(&segments).unwrap_or(Self::Unknown)
    }

    fn from_segments(segments: &[&str]) -> Option<Self> {
        match segments {
            ["orgs", org] => Some(Self::Org {
                org_id: org.parse().ok()?,
            }),
            ["orgs", org, "attendance", id] => Some(Self::Attendance {
                org_id: org.parse().ok()?,
                attendance_id: id.parse().ok()?,
            }),
            ["orgs", org, "members", uid] => Some(Self::Member {
                org_id: org.parse().ok()?,
                user_id: uid.parse().ok()?,
            }),
            ["orgs", org, rest @ ..] if !rest.is_empty() => {
                if rest.iter().any(|s| s.is_empty()) {
                    return None;
                }
                Some(Self::OrgDocument {
                    org_id: org.parse().ok()?,
                })
            }
            ["parents", parent, "contracts", sub_org] => Some(Self::Contract {
                parent_id: parent.parse().ok()?,
                sub_org_id: sub_org.parse().ok()?,
            }),
            ["parents", parent, "ledgers", period, "lines"] => Some(Self::LedgerLines {
                parent_id: parent.parse().ok()?,
                period_id: period.parse().ok()?,
                line_id: None,
            }),
            ["parents", parent, "ledgers", period, "lines", line] => Some(Self::LedgerLines {
                parent_id: parent.parse().ok()?,
                period_id: period.parse().ok()?,
                line_id: Some(line.parse().ok()?),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_ledger_line_path() {
        let line_id = LedgerLineId::derive(
            &ParentId::new("P1").unwrap(),
            &PeriodId::new("2026-W02").unwrap(),
            &AttendanceId::new("att-1").unwrap(),
        );
        let parsed = Resource::parse(&format!("parents/P1/ledgers/2026-W02/lines/{line_id}"));
        assert_eq!(
            parsed,
            Resource::LedgerLines {
                parent_id: ParentId::new("P1").unwrap(),
                period_id: PeriodId::new("2026-W02").unwrap(),
                line_id: Some(line_id),
            }
        );
    }

    #[test]
    fn test_ledger_collection_path() {
        assert!(matches!(
            Resource::parse("parents/P1/ledgers/2026-W02/lines"),
            Resource::LedgerLines { line_id: None, .. }
        ));
    }

    #[rstest]
    #[case("orgs/org-1", "org")]
    #[case("/orgs/org-1/", "org")]
    #[case("orgs/org-1/attendance/att-1", "attendance")]
    #[case("orgs/org-1/members/u-1", "member")]
    #[case("orgs/org-1/venues/v-1", "document")]
    #[case("orgs/org-1/attendance", "document")]
    #[case("parents/P1/contracts/org-1", "contract")]
    fn test_known_paths(#[case] path: &str, #[case] kind: &str) {
        let actual = match Resource::parse(path) {
            Resource::Org { .. } => "org",
            Resource::Attendance { .. } => "attendance",
            Resource::Member { .. } => "member",
            Resource::OrgDocument { .. } => "document",
            Resource::Contract { .. } => "contract",
            Resource::LedgerLines { .. } => "ledger",
            Resource::Unknown => "unknown",
        };
        assert_eq!(actual, kind);
    }

    #[rstest]
    #[case("")]
    #[case("parents/P1")]
    #[case("parents/P1/ledgers/2026-W02")]
    #[case("parents/P1/ledgers/2026-W02/lines/not-a-uuid")]
    #[case("parents/P1/ledgers/2026-W02/lines/x/extra")]
    #[case("orgs//attendance/att-1")]
    #[case("orgs/org-1//x")]
    #[case("users/u-1")]
    fn test_unknown_paths(#[case] path: &str) {
        assert_eq!(Resource::parse(path), Resource::Unknown);
    }
}
