//! Contract resolution: sub-organization → parent → contract.

use std::sync::Arc;

use rostra_shared::types::{OrgId, ParentId};

use crate::contract::types::Contract;
use crate::store::{ContractStore, OrgDirectory, StoreError, StoreResult};

/// Outcome of resolving the billing terms for a sub-organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A parent and a valid contract exist.
    Resolved {
        /// Billing parent.
        parent_id: ParentId,
        /// The contract between parent and sub-organization.
        contract: Contract,
    },
    /// The sub-organization is not under any billing relationship.
    NoParent,
    /// A parent exists but no contract has been set up yet.
    NoContract {
        /// Billing parent.
        parent_id: ParentId,
    },
    /// A contract exists but cannot be used for billing.
    InvalidContract {
        /// Billing parent.
        parent_id: ParentId,
        /// Why the contract was rejected.
        reason: String,
    },
}

/// Maps a sub-organization to its parent and fetches their contract.
#[derive(Clone)]
pub struct ContractResolver {
    orgs: Arc<dyn OrgDirectory>,
    contracts: Arc<dyn ContractStore>,
}

impl ContractResolver {
    /// Creates a resolver over the given stores.
    #[must_use]
    pub fn new(orgs: Arc<dyn OrgDirectory>, contracts: Arc<dyn ContractStore>) -> Self {
        Self { orgs, contracts }
    }

    /// Resolves the billing terms for `sub_org_id`.
    ///
    /// Missing mappings and unusable contracts are reported as [`Resolution`]
    /// variants. Only transport failures are returned as errors.
    pub async fn resolve(&self, sub_org_id: &OrgId) -> StoreResult<Resolution> {
        let Some(parent_id) = self.orgs.parent_of(sub_org_id).await? else {
            return Ok(Resolution::NoParent);
        };

        let contract = match self.contracts.contract(&parent_id, sub_org_id).await {
            Ok(Some(contract)) => contract,
            Ok(None) => return Ok(Resolution::NoContract { parent_id }),
            Err(StoreError::Corrupt(reason)) => {
                return Ok(Resolution::InvalidContract { parent_id, reason });
            }
            Err(e) => return Err(e),
        };

        if contract.parent_id != parent_id || &contract.sub_org_id != sub_org_id {
            return Ok(Resolution::InvalidContract {
                parent_id,
                reason: "contract does not belong to this parent/sub-organization".to_string(),
            });
        }

        if let Err(e) = contract.validate() {
            return Ok(Resolution::InvalidContract {
                parent_id,
                reason: e.to_string(),
            });
        }

        Ok(Resolution::Resolved {
            parent_id,
            contract,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::types::{PeriodType, RoundingPolicy};
    use crate::store::InMemoryStore;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn ids() -> (ParentId, OrgId) {
        (ParentId::new("P1").unwrap(), OrgId::new("org-1").unwrap())
    }

    fn contract(rate: Decimal) -> Contract {
        let (parent_id, sub_org_id) = ids();
        Contract {
            parent_id,
            sub_org_id,
            bill_rate: rate,
            rounding: RoundingPolicy::None,
            period: PeriodType::Monthly,
        }
    }

    fn resolver(store: &Arc<InMemoryStore>) -> ContractResolver {
        ContractResolver::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn test_resolves_parent_and_contract() {
        let store = Arc::new(InMemoryStore::new());
        let (parent, org) = ids();
        store.set_parent(org.clone(), parent.clone()).await;
        store.put_contract(contract(dec!(30))).await;

        let resolution = resolver(&store).resolve(&org).await.unwrap();
        assert_eq!(
            resolution,
            Resolution::Resolved {
                parent_id: parent,
                contract: contract(dec!(30)),
            }
        );
    }

    #[tokio::test]
    async fn test_no_parent_mapping() {
        let store = Arc::new(InMemoryStore::new());
        let (_, org) = ids();

        let resolution = resolver(&store).resolve(&org).await.unwrap();
        assert_eq!(resolution, Resolution::NoParent);
    }

    #[tokio::test]
    async fn test_no_contract_under_parent() {
        let store = Arc::new(InMemoryStore::new());
        let (parent, org) = ids();
        store.set_parent(org.clone(), parent.clone()).await;

        let resolution = resolver(&store).resolve(&org).await.unwrap();
        assert_eq!(resolution, Resolution::NoContract { parent_id: parent });
    }

    #[tokio::test]
    async fn test_contract_of_other_parent_is_not_used() {
        let store = Arc::new(InMemoryStore::new());
        let (_, org) = ids();
        let other = ParentId::new("P2").unwrap();
        store.set_parent(org.clone(), other.clone()).await;
        // Contract exists, but under P1, not P2.
        store.put_contract(contract(dec!(30))).await;

        let resolution = resolver(&store).resolve(&org).await.unwrap();
        assert_eq!(resolution, Resolution::NoContract { parent_id: other });
    }

    #[tokio::test]
    async fn test_negative_rate_is_invalid() {
        let store = Arc::new(InMemoryStore::new());
        let (parent, org) = ids();
        store.set_parent(org.clone(), parent).await;
        store.put_contract(contract(dec!(-5))).await;

        let resolution = resolver(&store).resolve(&org).await.unwrap();
        assert!(matches!(resolution, Resolution::InvalidContract { .. }));
    }

    #[tokio::test]
    async fn test_transient_failure_propagates() {
        let store = Arc::new(InMemoryStore::new());
        let (parent, org) = ids();
        store.set_parent(org.clone(), parent).await;
        store.fail_next_reads(1);

        let result = resolver(&store).resolve(&org).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
