//! Ledger repository: append-only ledger lines.
//!
//! The only write is `INSERT .. ON CONFLICT DO NOTHING`. Zero affected rows
//! means a line with the same key (or the same source record) already exists.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::debug;

use rostra_core::ledger::LedgerLine;
use rostra_core::store::{CreateResult, LedgerStore, StoreResult};
use rostra_shared::types::{
    AttendanceId, LedgerLineId, OrgId, ParentId, PeriodId, StaffRef, VenueId,
};

use crate::entities::ledger_lines;
use crate::repositories::{corrupt, store_error};
use crate::rls::RlsConnection;

/// Ledger repository backed by the `ledger_lines` table.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_active_model(line: &LedgerLine) -> ledger_lines::ActiveModel {
    ledger_lines::ActiveModel {
        parent_id: Set(line.parent_id.to_string()),
        period_id: Set(line.period_id.to_string()),
        line_id: Set(line.line_id.into_inner()),
        sub_org_id: Set(line.sub_org_id.to_string()),
        staff_ref: Set(line.staff_ref.into_inner()),
        venue_id: Set(line.venue_id.to_string()),
        hours: Set(line.hours),
        bill_rate: Set(line.bill_rate),
        amount: Set(line.amount),
        source_attendance_id: Set(line.source_attendance_id.to_string()),
        created_at: Set(line.created_at.into()),
    }
}

fn to_line(model: ledger_lines::Model) -> StoreResult<LedgerLine> {
    Ok(LedgerLine {
        line_id: LedgerLineId::from_uuid(model.line_id),
        parent_id: ParentId::new(model.parent_id)
            .map_err(|e| corrupt("ledger_lines.parent_id", e))?,
        sub_org_id: OrgId::new(model.sub_org_id)
            .map_err(|e| corrupt("ledger_lines.sub_org_id", e))?,
        staff_ref: StaffRef::from_uuid(model.staff_ref),
        venue_id: VenueId::new(model.venue_id).map_err(|e| corrupt("ledger_lines.venue_id", e))?,
        period_id: PeriodId::new(model.period_id)
            .map_err(|e| corrupt("ledger_lines.period_id", e))?,
        hours: model.hours,
        bill_rate: model.bill_rate,
        amount: model.amount,
        source_attendance_id: AttendanceId::new(model.source_attendance_id)
            .map_err(|e| corrupt("ledger_lines.source_attendance_id", e))?,
        created_at: model.created_at.into(),
    })
}

#[async_trait]
impl LedgerStore for LedgerRepository {
    async fn create_if_absent(&self, line: &LedgerLine) -> StoreResult<CreateResult> {
        let rls = RlsConnection::for_parent(&self.db, &line.parent_id)
            .await
            .map_err(store_error)?;

        let inserted = ledger_lines::Entity::insert(to_active_model(line))
            .on_conflict(OnConflict::new().do_nothing().to_owned())
            .exec_without_returning(rls.transaction())
            .await
            .map_err(store_error)?;
        rls.commit().await.map_err(store_error)?;

        debug!(path = %line.path(), inserted, "Ledger insert finished");
        if inserted == 0 {
            Ok(CreateResult::AlreadyExists)
        } else {
            Ok(CreateResult::Created)
        }
    }

    async fn list_lines(
        &self,
        parent_id: &ParentId,
        period_id: &PeriodId,
    ) -> StoreResult<Vec<LedgerLine>> {
        let rls = RlsConnection::for_parent(&self.db, parent_id)
            .await
            .map_err(store_error)?;
        let models = ledger_lines::Entity::find()
            .filter(ledger_lines::Column::ParentId.eq(parent_id.as_str()))
            .filter(ledger_lines::Column::PeriodId.eq(period_id.as_str()))
            .order_by_asc(ledger_lines::Column::CreatedAt)
            .order_by_asc(ledger_lines::Column::LineId)
            .all(rls.transaction())
            .await
            .map_err(store_error)?;
        rls.commit().await.map_err(store_error)?;

        models.into_iter().map(to_line).collect()
    }

    async fn get_line(
        &self,
        parent_id: &ParentId,
        period_id: &PeriodId,
        line_id: LedgerLineId,
    ) -> StoreResult<Option<LedgerLine>> {
        let rls = RlsConnection::for_parent(&self.db, parent_id)
            .await
            .map_err(store_error)?;
        let model = ledger_lines::Entity::find_by_id((
            parent_id.to_string(),
            period_id.to_string(),
            line_id.into_inner(),
        ))
        .one(rls.transaction())
        .await
        .map_err(store_error)?;
        rls.commit().await.map_err(store_error)?;

        model.map(to_line).transpose()
    }
}
