//! Storage-level guards for the ledger.
//!
//! - `ledger_lines` rejects UPDATE and DELETE for every role
//! - Row-level security scopes parent data by `app.current_parent_id`
//!   and tenant data by `app.current_org_id`
//!
//! RLS is FORCEd so it also applies to the table owner.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(APPEND_ONLY_SQL).await?;
        db.execute_unprepared(RLS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(DROP_RLS_SQL).await?;
        db.execute_unprepared(DROP_APPEND_ONLY_SQL).await?;

        Ok(())
    }
}

const APPEND_ONLY_SQL: &str = r"
-- ============================================================
-- APPEND-ONLY LEDGER
-- ============================================================

CREATE OR REPLACE FUNCTION reject_ledger_line_mutation()
RETURNS TRIGGER AS $$
BEGIN
    RAISE EXCEPTION 'Ledger lines are append-only. Write a compensating line instead.'
        USING ERRCODE = 'restrict_violation';
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_ledger_lines_append_only
    BEFORE UPDATE OR DELETE ON ledger_lines
    FOR EACH ROW EXECUTE FUNCTION reject_ledger_line_mutation();

CREATE TRIGGER trg_ledger_lines_no_truncate
    BEFORE TRUNCATE ON ledger_lines
    FOR EACH STATEMENT EXECUTE FUNCTION reject_ledger_line_mutation();
";

const RLS_SQL: &str = r"
-- ============================================================
-- ROW LEVEL SECURITY
-- ============================================================

ALTER TABLE organizations ENABLE ROW LEVEL SECURITY;
ALTER TABLE memberships ENABLE ROW LEVEL SECURITY;
ALTER TABLE contracts ENABLE ROW LEVEL SECURITY;
ALTER TABLE ledger_lines ENABLE ROW LEVEL SECURITY;

ALTER TABLE organizations FORCE ROW LEVEL SECURITY;
ALTER TABLE memberships FORCE ROW LEVEL SECURITY;
ALTER TABLE contracts FORCE ROW LEVEL SECURITY;
ALTER TABLE ledger_lines FORCE ROW LEVEL SECURITY;

CREATE POLICY tenant_isolation ON organizations
    USING (id = current_setting('app.current_org_id', true));

CREATE POLICY tenant_isolation ON memberships
    USING (org_id = current_setting('app.current_org_id', true));

CREATE POLICY parent_isolation ON contracts
    USING (parent_id = current_setting('app.current_parent_id', true));

CREATE POLICY parent_isolation ON ledger_lines
    USING (parent_id = current_setting('app.current_parent_id', true));
";

const DROP_RLS_SQL: &str = r"
DROP POLICY IF EXISTS parent_isolation ON ledger_lines;
DROP POLICY IF EXISTS parent_isolation ON contracts;
DROP POLICY IF EXISTS tenant_isolation ON memberships;
DROP POLICY IF EXISTS tenant_isolation ON organizations;

ALTER TABLE ledger_lines NO FORCE ROW LEVEL SECURITY;
ALTER TABLE contracts NO FORCE ROW LEVEL SECURITY;
ALTER TABLE memberships NO FORCE ROW LEVEL SECURITY;
ALTER TABLE organizations NO FORCE ROW LEVEL SECURITY;

ALTER TABLE ledger_lines DISABLE ROW LEVEL SECURITY;
ALTER TABLE contracts DISABLE ROW LEVEL SECURITY;
ALTER TABLE memberships DISABLE ROW LEVEL SECURITY;
ALTER TABLE organizations DISABLE ROW LEVEL SECURITY;
";

const DROP_APPEND_ONLY_SQL: &str = r"
DROP TRIGGER IF EXISTS trg_ledger_lines_no_truncate ON ledger_lines;
DROP TRIGGER IF EXISTS trg_ledger_lines_append_only ON ledger_lines;
DROP FUNCTION IF EXISTS reject_ledger_line_mutation();
";
