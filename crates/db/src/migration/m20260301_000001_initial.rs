//! Initial database migration.
//!
//! Creates the tenant directory, membership, contract and ledger tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: TENANTS
        // ============================================================
        db.execute_unprepared(ORGANIZATIONS_SQL).await?;
        db.execute_unprepared(MEMBERSHIPS_SQL).await?;

        // ============================================================
        // PART 2: BILLING
        // ============================================================
        db.execute_unprepared(CONTRACTS_SQL).await?;
        db.execute_unprepared(LEDGER_LINES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ORGANIZATIONS_SQL: &str = r"
CREATE TABLE organizations (
    id          TEXT PRIMARY KEY,
    parent_id   TEXT,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_organizations_id CHECK (length(id) BETWEEN 1 AND 128 AND strpos(id, '/') = 0),
    CONSTRAINT chk_organizations_parent CHECK (
        parent_id IS NULL OR (length(parent_id) BETWEEN 1 AND 128 AND strpos(parent_id, '/') = 0)
    )
);

CREATE INDEX idx_organizations_parent ON organizations(parent_id) WHERE parent_id IS NOT NULL;
";

const MEMBERSHIPS_SQL: &str = r"
CREATE TABLE memberships (
    org_id      TEXT NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
    user_id     TEXT NOT NULL,
    role        TEXT NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    PRIMARY KEY (org_id, user_id),
    CONSTRAINT chk_memberships_role CHECK (role IN ('staff', 'manager', 'admin', 'owner'))
);

CREATE INDEX idx_memberships_user ON memberships(user_id);
";

const CONTRACTS_SQL: &str = r"
CREATE TABLE contracts (
    parent_id   TEXT NOT NULL,
    sub_org_id  TEXT NOT NULL REFERENCES organizations(id),
    bill_rate   NUMERIC NOT NULL,
    rounding    TEXT NOT NULL,
    period      TEXT NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    PRIMARY KEY (parent_id, sub_org_id),
    CONSTRAINT chk_contracts_rate CHECK (bill_rate >= 0),
    CONSTRAINT chk_contracts_rounding CHECK (rounding IN ('none', 'nearest-5', 'nearest-15')),
    CONSTRAINT chk_contracts_period CHECK (period IN ('weekly', 'biweekly', 'monthly'))
);
";

const LEDGER_LINES_SQL: &str = r"
CREATE TABLE ledger_lines (
    parent_id             TEXT NOT NULL,
    period_id             TEXT NOT NULL,
    line_id               UUID NOT NULL,
    sub_org_id            TEXT NOT NULL,
    staff_ref             UUID NOT NULL,
    venue_id              TEXT NOT NULL,
    hours                 NUMERIC NOT NULL,
    bill_rate             NUMERIC NOT NULL,
    amount                NUMERIC(19, 2) NOT NULL,
    source_attendance_id  TEXT NOT NULL,
    created_at            TIMESTAMPTZ NOT NULL,

    PRIMARY KEY (parent_id, period_id, line_id),
    -- At most one line per source attendance record in a period
    CONSTRAINT uq_ledger_lines_source UNIQUE (parent_id, period_id, source_attendance_id),
    CONSTRAINT chk_ledger_lines_hours CHECK (hours >= 0),
    CONSTRAINT chk_ledger_lines_rate CHECK (bill_rate >= 0),
    CONSTRAINT chk_ledger_lines_amount CHECK (amount >= 0)
);

CREATE INDEX idx_ledger_lines_listing ON ledger_lines(parent_id, period_id, created_at, line_id);
CREATE INDEX idx_ledger_lines_sub_org ON ledger_lines(sub_org_id);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS ledger_lines;
DROP TABLE IF EXISTS contracts;
DROP TABLE IF EXISTS memberships;
DROP TABLE IF EXISTS organizations;
";
