//! `SeaORM` Entity for ledger_lines table.
//!
//! Rows are append-only; the database rejects UPDATE and DELETE.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ledger_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub parent_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub period_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub line_id: Uuid,
    pub sub_org_id: String,
    pub staff_ref: Uuid,
    pub venue_id: String,
    pub hours: Decimal,
    pub bill_rate: Decimal,
    pub amount: Decimal,
    pub source_attendance_id: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
