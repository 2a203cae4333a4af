//! Organization repository: the tenant → parent directory.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

use rostra_core::store::{OrgDirectory, StoreResult};
use rostra_shared::types::{OrgId, ParentId};

use crate::entities::organizations;
use crate::repositories::{corrupt, store_error};
use crate::rls::RlsConnection;

/// Organization repository backed by the `organizations` table.
#[derive(Debug, Clone)]
pub struct OrganizationRepository {
    db: DatabaseConnection,
}

impl OrganizationRepository {
    /// Creates a new organization repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates or re-parents an organization.
    ///
    /// Server-side provisioning only; clients never write organizations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn upsert(&self, org_id: &OrgId, parent_id: Option<&ParentId>) -> StoreResult<()> {
        let now = Utc::now().into();
        let model = organizations::ActiveModel {
            id: Set(org_id.to_string()),
            parent_id: Set(parent_id.map(ToString::to_string)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let rls = RlsConnection::for_org(&self.db, org_id)
            .await
            .map_err(store_error)?;
        organizations::Entity::insert(model)
            .on_conflict(
                OnConflict::column(organizations::Column::Id)
                    .update_columns([
                        organizations::Column::ParentId,
                        organizations::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(rls.transaction())
            .await
            .map_err(store_error)?;
        rls.commit().await.map_err(store_error)
    }
}

#[async_trait]
impl OrgDirectory for OrganizationRepository {
    async fn parent_of(&self, org_id: &OrgId) -> StoreResult<Option<ParentId>> {
        let rls = RlsConnection::for_org(&self.db, org_id)
            .await
            .map_err(store_error)?;
        let org = organizations::Entity::find_by_id(org_id.as_str())
            .one(rls.transaction())
            .await
            .map_err(store_error)?;
        rls.commit().await.map_err(store_error)?;

        org.and_then(|o| o.parent_id)
            .map(|p| ParentId::new(p).map_err(|e| corrupt("organizations.parent_id", e)))
            .transpose()
    }
}
