//! Membership repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

use rostra_core::access::{MemberRole, Membership};
use rostra_core::store::{MembershipStore, StoreResult};
use rostra_shared::types::{OrgId, UserId};

use crate::entities::memberships;
use crate::repositories::{corrupt, store_error};
use crate::rls::RlsConnection;

/// Membership repository backed by the `memberships` table.
#[derive(Debug, Clone)]
pub struct MembershipRepository {
    db: DatabaseConnection,
}

impl MembershipRepository {
    /// Creates a new membership repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a member or changes their role.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn upsert(&self, membership: &Membership) -> StoreResult<()> {
        let now = Utc::now().into();
        let model = memberships::ActiveModel {
            org_id: Set(membership.org_id.to_string()),
            user_id: Set(membership.user_id.to_string()),
            role: Set(membership.role.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let rls = RlsConnection::for_org(&self.db, &membership.org_id)
            .await
            .map_err(store_error)?;
        memberships::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([memberships::Column::OrgId, memberships::Column::UserId])
                    .update_columns([memberships::Column::Role, memberships::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(rls.transaction())
            .await
            .map_err(store_error)?;
        rls.commit().await.map_err(store_error)
    }
}

fn to_membership(model: memberships::Model) -> StoreResult<Membership> {
    Ok(Membership {
        org_id: OrgId::new(model.org_id).map_err(|e| corrupt("memberships.org_id", e))?,
        user_id: UserId::new(model.user_id).map_err(|e| corrupt("memberships.user_id", e))?,
        role: MemberRole::parse(&model.role)
            .ok_or_else(|| corrupt("memberships.role", &model.role))?,
    })
}

#[async_trait]
impl MembershipStore for MembershipRepository {
    async fn membership(
        &self,
        org_id: &OrgId,
        user_id: &UserId,
    ) -> StoreResult<Option<Membership>> {
        let rls = RlsConnection::for_org(&self.db, org_id)
            .await
            .map_err(store_error)?;
        let found = memberships::Entity::find_by_id((org_id.to_string(), user_id.to_string()))
            .one(rls.transaction())
            .await
            .map_err(store_error)?;
        rls.commit().await.map_err(store_error)?;

        found.map(to_membership).transpose()
    }
}
