//! Typed IDs for type-safe entity references.
//!
//! Document identifiers are opaque strings issued by the tenant-facing
//! application. Every one of them ends up as a segment of a storage path
//! (`parents/{parentId}/ledgers/{periodId}/lines/{lineId}`), so construction
//! rejects anything that could escape its collection.
//!
//! Ledger line ids and staff references are never random: they are UUIDv5
//! values derived from the data they identify, which is what makes a
//! replayed write land on the same key.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Maximum length of a document identifier, in bytes.
pub const MAX_ID_LEN: usize = 128;

/// Errors produced when parsing a document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// The identifier was empty.
    #[error("identifier must not be empty")]
    Empty,

    /// The identifier exceeded [`MAX_ID_LEN`].
    #[error("identifier exceeds {MAX_ID_LEN} bytes")]
    TooLong,

    /// The identifier contained a path separator.
    #[error("identifier must not contain '/': {0}")]
    PathSeparator(String),
}

fn validate_segment(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.len() > MAX_ID_LEN {
        return Err(IdError::TooLong);
    }
    if value.contains('/') {
        return Err(IdError::PathSeparator(value.to_string()));
    }
    Ok(())
}

/// Macro to generate string-backed typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates an ID after validating it is a single path segment.
            ///
            /// # Errors
            ///
            /// Returns an [`IdError`] for empty, oversized, or `/`-containing values.
            pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
                let value = value.into();
                validate_segment(&value)?;
                Ok(Self(value))
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

typed_id!(OrgId, "Identifier of a sub-organization (tenant).");
typed_id!(ParentId, "Identifier of a parent (billing) organization.");
typed_id!(StaffId, "Identifier of a staff member inside a tenant.");
typed_id!(VenueId, "Identifier of a venue inside a tenant.");
typed_id!(AttendanceId, "Identifier of an attendance record.");
typed_id!(UserId, "Identifier of an authenticated principal.");
typed_id!(PeriodId, "Canonical billing-period identifier (e.g. `2026-W03`).");

/// Namespace for ledger line ids.
const LEDGER_LINE_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2d4e_8a3b_4c7d_9e10_5b2a_7c8d_1e01);

/// Namespace for pseudonymous staff references.
const STAFF_REF_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2d4e_8a3b_4c7d_9e10_5b2a_7c8d_1e02);

/// Storage key of a ledger line inside `parents/{p}/ledgers/{period}/lines`.
///
/// There is deliberately no random constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerLineId(Uuid);

impl LedgerLineId {
    /// Derives the line id for one source attendance record.
    #[must_use]
    pub fn derive(parent_id: &ParentId, period_id: &PeriodId, source: &AttendanceId) -> Self {
        let name = format!("{parent_id}/{period_id}/{source}");
        Self(Uuid::new_v5(&LEDGER_LINE_NAMESPACE, name.as_bytes()))
    }

    /// Wraps a UUID read back from storage.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for LedgerLineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LedgerLineId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Opaque, stable reference to a staff member as seen by a parent organization.
///
/// Parents never receive the tenant's staff id; the tenant can recompute the
/// reference from its own data when reconciling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffRef(Uuid);

impl StaffRef {
    /// Derives the pseudonymous reference for a staff member of a tenant.
    #[must_use]
    pub fn pseudonymize(org_id: &OrgId, staff_id: &StaffId) -> Self {
        let name = format!("{org_id}/{staff_id}");
        Self(Uuid::new_v5(&STAFF_REF_NAMESPACE, name.as_bytes()))
    }

    /// Wraps a UUID read back from storage.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for StaffRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
