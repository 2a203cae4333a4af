//! Storage seams for the replication pipeline.
//!
//! Every component receives its store explicitly. Production wiring passes
//! the PostgreSQL repositories from `rostra-db`; tests pass [`InMemoryStore`],
//! which can also simulate transient failures and duplicate-delivery races.
//!
//! None of these traits exposes an update or delete path for ledger lines.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use rostra_shared::types::{LedgerLineId, OrgId, ParentId, PeriodId, UserId};

use crate::access::Membership;
use crate::contract::Contract;
use crate::ledger::LedgerLine;

pub use memory::InMemoryStore;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by storage backends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend could not be reached or timed out.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A stored document could not be interpreted.
    #[error("corrupt record: {0}")]
    Corrupt(String),

    /// The backend refused the operation and will refuse it again: a
    /// constraint, range or permission violation.
    #[error("rejected by storage: {0}")]
    Rejected(String),

    /// Any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Returns true if repeating the operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Backend(_))
    }
}

/// Result of an atomic create-if-absent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateResult {
    /// The line did not exist and was stored.
    Created,
    /// A line already existed under the same key; nothing was written.
    AlreadyExists,
}

/// Maps a sub-organization to its parent (`orgs/{orgId}.parentId`).
#[async_trait]
pub trait OrgDirectory: Send + Sync {
    /// Returns the billing parent of `org_id`, if the org has one.
    async fn parent_of(&self, org_id: &OrgId) -> StoreResult<Option<ParentId>>;
}

/// Read access to billing contracts (`parents/{parentId}/contracts/{subOrgId}`).
#[async_trait]
pub trait ContractStore: Send + Sync {
    /// Returns the contract between `parent_id` and `sub_org_id`, if any.
    async fn contract(
        &self,
        parent_id: &ParentId,
        sub_org_id: &OrgId,
    ) -> StoreResult<Option<Contract>>;
}

/// Append-only ledger storage (`parents/{parentId}/ledgers/{periodId}/lines`).
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Stores `line` under its key unless a line already exists there.
    ///
    /// Implementations must make the existence check and the insert a single
    /// atomic operation.
    async fn create_if_absent(&self, line: &LedgerLine) -> StoreResult<CreateResult>;

    /// Lists the lines of one ledger period, oldest first.
    async fn list_lines(
        &self,
        parent_id: &ParentId,
        period_id: &PeriodId,
    ) -> StoreResult<Vec<LedgerLine>>;

    /// Fetches a single line.
    async fn get_line(
        &self,
        parent_id: &ParentId,
        period_id: &PeriodId,
        line_id: LedgerLineId,
    ) -> StoreResult<Option<LedgerLine>>;
}

/// Membership documents (`orgs/{orgId}/members/{uid}`).
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Returns the membership of `user_id` in `org_id`, if the document exists.
    async fn membership(&self, org_id: &OrgId, user_id: &UserId)
    -> StoreResult<Option<Membership>>;
}
