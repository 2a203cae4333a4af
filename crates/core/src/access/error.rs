//! Authorization errors.

use thiserror::Error;

use crate::attendance::AttendanceError;
use crate::store::StoreError;

/// Errors returned by the authorization policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The request is not allowed.
    #[error("access denied: {0}")]
    Denied(&'static str),

    /// A member token named a role that does not exist.
    #[error("unknown member role: {0}")]
    UnknownRole(String),

    /// The attendance write breaks the record's write rules.
    #[error("attendance write rejected: {0}")]
    InvalidWrite(#[from] AttendanceError),

    /// Membership could not be checked. The request is not allowed.
    #[error("membership lookup failed: {0}")]
    Store(#[from] StoreError),
}
