//! In-memory store for tests and local runs.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use rostra_shared::types::{LedgerLineId, OrgId, ParentId, PeriodId, UserId};

use crate::access::Membership;
use crate::contract::Contract;
use crate::ledger::LedgerLine;
use crate::store::{
    ContractStore, CreateResult, LedgerStore, MembershipStore, OrgDirectory, StoreError,
    StoreResult,
};

#[derive(Debug, Clone)]
enum StoredContract {
    Valid(Contract),
    Corrupt(String),
}

type LedgerKey = (ParentId, PeriodId);

/// Implements every storage trait over process memory.
///
/// The ledger map sits behind a single mutex, so the existence check and the
/// insert in [`LedgerStore::create_if_absent`] cannot interleave.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    parents: RwLock<HashMap<OrgId, ParentId>>,
    contracts: RwLock<HashMap<(ParentId, OrgId), StoredContract>>,
    memberships: RwLock<HashMap<(OrgId, UserId), Membership>>,
    lines: Mutex<HashMap<LedgerKey, BTreeMap<LedgerLineId, LedgerLine>>>,
    failing_reads: AtomicUsize,
    failing_writes: AtomicUsize,
    rejecting_writes: AtomicUsize,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `org_id` under `parent_id`.
    pub async fn set_parent(&self, org_id: OrgId, parent_id: ParentId) {
        self.parents.write().await.insert(org_id, parent_id);
    }

    /// Stores a contract under its parent and sub-organization.
    pub async fn put_contract(&self, contract: Contract) {
        let key = (contract.parent_id.clone(), contract.sub_org_id.clone());
        self.contracts
            .write()
            .await
            .insert(key, StoredContract::Valid(contract));
    }

    /// Stores a contract document that cannot be interpreted.
    pub async fn put_corrupt_contract(&self, parent_id: ParentId, sub_org_id: OrgId, reason: &str) {
        self.contracts
            .write()
            .await
            .insert((parent_id, sub_org_id), StoredContract::Corrupt(reason.to_string()));
    }

    /// Stores a membership document.
    pub async fn put_membership(&self, membership: Membership) {
        let key = (membership.org_id.clone(), membership.user_id.clone());
        self.memberships.write().await.insert(key, membership);
    }

    /// Makes the next `n` reads fail with `StoreError::Unavailable`.
    pub fn fail_next_reads(&self, n: usize) {
        self.failing_reads.store(n, Ordering::SeqCst);
    }

    /// Makes the next `n` ledger writes fail with `StoreError::Unavailable`.
    pub fn fail_next_writes(&self, n: usize) {
        self.failing_writes.store(n, Ordering::SeqCst);
    }

    /// Makes the next `n` ledger writes fail with `StoreError::Rejected`.
    pub fn reject_next_writes(&self, n: usize) {
        self.rejecting_writes.store(n, Ordering::SeqCst);
    }

    /// Total number of ledger lines across all parents and periods.
    pub async fn line_count(&self) -> usize {
        self.lines.lock().await.values().map(BTreeMap::len).sum()
    }

    fn injected_failure(counter: &AtomicUsize, op: &str) -> StoreResult<()> {
        let failed = counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(StoreError::Unavailable(format!("injected {op} failure")));
        }
        Ok(())
    }

    fn check_read(&self) -> StoreResult<()> {
        Self::injected_failure(&self.failing_reads, "read")
    }

    fn check_write(&self) -> StoreResult<()> {
        Self::injected_failure(&self.failing_writes, "write")?;
        let rejected = self
            .rejecting_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if rejected {
            return Err(StoreError::Rejected("injected write rejection".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl OrgDirectory for InMemoryStore {
    async fn parent_of(&self, org_id: &OrgId) -> StoreResult<Option<ParentId>> {
        self.check_read()?;
        Ok(self.parents.read().await.get(org_id).cloned())
    }
}

#[async_trait]
impl ContractStore for InMemoryStore {
    async fn contract(
        &self,
        parent_id: &ParentId,
        sub_org_id: &OrgId,
    ) -> StoreResult<Option<Contract>> {
        self.check_read()?;
        let contracts = self.contracts.read().await;
        match contracts.get(&(parent_id.clone(), sub_org_id.clone())) {
            None => Ok(None),
            Some(StoredContract::Valid(contract)) => Ok(Some(contract.clone())),
            Some(StoredContract::Corrupt(reason)) => Err(StoreError::Corrupt(reason.clone())),
        }
    }
}

#[async_trait]
impl LedgerStore for InMemoryStore {
    async fn create_if_absent(&self, line: &LedgerLine) -> StoreResult<CreateResult> {
        self.check_write()?;
        let mut lines = self.lines.lock().await;
        let period = lines
            .entry((line.parent_id.clone(), line.period_id.clone()))
            .or_default();

        if period.contains_key(&line.line_id) {
            return Ok(CreateResult::AlreadyExists);
        }
        period.insert(line.line_id, line.clone());
        Ok(CreateResult::Created)
    }

    async fn list_lines(
        &self,
        parent_id: &ParentId,
        period_id: &PeriodId,
    ) -> StoreResult<Vec<LedgerLine>> {
        self.check_read()?;
        let lines = self.lines.lock().await;
        let mut found: Vec<LedgerLine> = lines
            .get(&(parent_id.clone(), period_id.clone()))
            .map(|period| period.values().cloned().collect())
            .unwrap_or_default();
        found.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.line_id.cmp(&b.line_id))
        });
        Ok(found)
    }

    async fn get_line(
        &self,
        parent_id: &ParentId,
        period_id: &PeriodId,
        line_id: LedgerLineId,
    ) -> StoreResult<Option<LedgerLine>> {
        self.check_read()?;
        let lines = self.lines.lock().await;
        Ok(lines
            .get(&(parent_id.clone(), period_id.clone()))
            .and_then(|period| period.get(&line_id))
            .cloned())
    }
}

#[async_trait]
impl MembershipStore for InMemoryStore {
    async fn membership(
        &self,
        org_id: &OrgId,
        user_id: &UserId,
    ) -> StoreResult<Option<Membership>> {
        self.check_read()?;
        let memberships = self.memberships.read().await;
        Ok(memberships.get(&(org_id.clone(), user_id.clone())).cloned())
    }
}
