//! Row-Level Security (RLS) context management.
//!
//! Parent-scoped tables (`contracts`, `ledger_lines`) are filtered by
//! `app.current_parent_id`; tenant-scoped tables (`organizations`,
//! `memberships`) by `app.current_org_id`. Both are set with
//! `set_config(.., true)`, which scopes the value to the current transaction.
//!
//! # Usage
//!
//! ```ignore
//! use rostra_db::rls::RlsConnection;
//!
//! let rls = RlsConnection::for_parent(&db, &parent_id).await?;
//! let lines = LedgerLines::find().all(rls.transaction()).await?;
//! rls.commit().await?;
//! ```

use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr, Statement,
    TransactionTrait,
};

use rostra_shared::types::{OrgId, ParentId};

/// Session setting that scopes parent-owned rows.
pub const PARENT_SETTING: &str = "app.current_parent_id";

/// Session setting that scopes tenant-owned rows.
pub const ORG_SETTING: &str = "app.current_org_id";

/// A database transaction with an RLS scope applied.
pub struct RlsConnection {
    txn: DatabaseTransaction,
}

impl RlsConnection {
    /// Begins a transaction scoped to one parent organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started or the RLS
    /// context cannot be set.
    pub async fn for_parent(db: &DatabaseConnection, parent_id: &ParentId) -> Result<Self, DbErr> {
        Self::scoped(db, PARENT_SETTING, parent_id.as_str()).await
    }

    /// Begins a transaction scoped to one tenant.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started or the RLS
    /// context cannot be set.
    pub async fn for_org(db: &DatabaseConnection, org_id: &OrgId) -> Result<Self, DbErr> {
        Self::scoped(db, ORG_SETTING, org_id.as_str()).await
    }

    async fn scoped(db: &DatabaseConnection, setting: &str, value: &str) -> Result<Self, DbErr> {
        let txn = db.begin().await?;
        set_rls_context(&txn, setting, value).await?;
        Ok(Self { txn })
    }

    /// Returns a reference to the underlying transaction for executing queries.
    #[must_use]
    pub const fn transaction(&self) -> &DatabaseTransaction {
        &self.txn
    }

    /// Commits the transaction, persisting all changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    pub async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await
    }

    /// Rolls back the transaction, discarding all changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback fails.
    pub async fn rollback(self) -> Result<(), DbErr> {
        self.txn.rollback().await
    }
}

fn set_config_statement(setting: &str, value: &str) -> Statement {
    Statement::from_sql_and_values(
        DbBackend::Postgres,
        "SELECT set_config($1, $2, true)",
        [setting.into(), value.into()],
    )
}

/// Sets an RLS setting on an existing transaction.
///
/// # Errors
///
/// Returns an error if the RLS context cannot be set.
pub async fn set_rls_context(
    txn: &DatabaseTransaction,
    setting: &str,
    value: &str,
) -> Result<(), DbErr> {
    txn.execute(set_config_statement(setting, value)).await?;
    Ok(())
}
