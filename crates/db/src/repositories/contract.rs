//! Contract repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use tracing::warn;

use rostra_core::contract::Contract;
use rostra_core::store::{ContractStore, StoreResult};
use rostra_shared::types::{OrgId, ParentId};

use crate::entities::contracts;
use crate::repositories::{corrupt, store_error};
use crate::rls::RlsConnection;

/// Contract repository backed by the `contracts` table.
#[derive(Debug, Clone)]
pub struct ContractRepository {
    db: DatabaseConnection,
}

impl ContractRepository {
    /// Creates a new contract repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates or replaces the contract between a parent and a sub-organization.
    ///
    /// Server-side provisioning only; clients never write contracts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn upsert(&self, contract: &Contract) -> StoreResult<()> {
        let now = Utc::now().into();
        let model = contracts::ActiveModel {
            parent_id: Set(contract.parent_id.to_string()),
            sub_org_id: Set(contract.sub_org_id.to_string()),
            bill_rate: Set(contract.bill_rate),
            rounding: Set(contract.rounding.as_str().to_string()),
            period: Set(contract.period.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let rls = RlsConnection::for_parent(&self.db, &contract.parent_id)
            .await
            .map_err(store_error)?;
        contracts::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([contracts::Column::ParentId, contracts::Column::SubOrgId])
                    .update_columns([
                        contracts::Column::BillRate,
                        contracts::Column::Rounding,
                        contracts::Column::Period,
                        contracts::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(rls.transaction())
            .await
            .map_err(store_error)?;
        rls.commit().await.map_err(store_error)
    }
}

fn to_contract(model: contracts::Model) -> StoreResult<Contract> {
    Ok(Contract {
        parent_id: ParentId::new(model.parent_id)
            .map_err(|e| corrupt("contracts.parent_id", e))?,
        sub_org_id: OrgId::new(model.sub_org_id).map_err(|e| corrupt("contracts.sub_org_id", e))?,
        bill_rate: model.bill_rate,
        rounding: model
            .rounding
            .parse()
            .map_err(|e| corrupt("contracts.rounding", e))?,
        period: model
            .period
            .parse()
            .map_err(|e| corrupt("contracts.period", e))?,
    })
}

#[async_trait]
impl ContractStore for ContractRepository {
    async fn contract(
        &self,
        parent_id: &ParentId,
        sub_org_id: &OrgId,
    ) -> StoreResult<Option<Contract>> {
        let rls = RlsConnection::for_parent(&self.db, parent_id)
            .await
            .map_err(store_error)?;
        let found = contracts::Entity::find_by_id((parent_id.to_string(), sub_org_id.to_string()))
            .one(rls.transaction())
            .await
            .map_err(store_error)?;
        rls.commit().await.map_err(store_error)?;

        found
            .map(|model| {
                to_contract(model).inspect_err(|e| {
                    warn!(%parent_id, %sub_org_id, error = %e, "Stored contract is unreadable");
                })
            })
            .transpose()
    }
}
