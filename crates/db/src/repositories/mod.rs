//! `PostgreSQL` implementations of the core storage traits.
//!
//! Every query runs inside an [`RlsConnection`](crate::rls::RlsConnection)
//! scoped to the parent or tenant it touches.

mod contract;
mod ledger;
mod membership;
mod organization;

pub use contract::ContractRepository;
pub use ledger::LedgerRepository;
pub use membership::MembershipRepository;
pub use organization::OrganizationRepository;

use std::borrow::Cow;

use sea_orm::{DbErr, RuntimeErr};

use rostra_core::store::StoreError;

/// SQLSTATE classes the server refuses again on every retry. Class 42 covers
/// row-level security rejections.
const PERMANENT_SQLSTATE_CLASSES: [&str; 3] = ["22", "23", "42"];

fn sqlstate(err: &DbErr) -> Option<String> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .and_then(|db| db.code())
            .map(Cow::into_owned),
        _ => None,
    }
}

fn is_permanent_sqlstate(code: &str) -> bool {
    PERMANENT_SQLSTATE_CLASSES
        .iter()
        .any(|class| code.starts_with(class))
}

/// Maps a database error onto the storage error taxonomy.
///
/// Connection failures are transient. Statements the server refuses with a
/// permanent SQLSTATE are rejected. Everything else is a backend error.
pub(crate) fn store_error(err: DbErr) -> StoreError {
    if let Some(code) = sqlstate(&err).filter(|code| is_permanent_sqlstate(code)) {
        return StoreError::Rejected(format!("{code}: {err}"));
    }
    match err {
        DbErr::ConnectionAcquire(e) => StoreError::Unavailable(e.to_string()),
        DbErr::Conn(e) => StoreError::Unavailable(e.to_string()),
        other => StoreError::Backend(other.to_string()),
    }
}

/// Maps an unreadable stored value onto [`StoreError::Corrupt`].
pub(crate) fn corrupt(column: &str, err: impl std::fmt::Display) -> StoreError {
    StoreError::Corrupt(format!("{column}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_errors_are_transient() {
        let err = store_error(DbErr::Conn(RuntimeErr::Internal("refused".into())));
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_query_errors_are_backend() {
        let err = store_error(DbErr::Custom("boom".into()));
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[test]
    fn test_permanent_sqlstate_classes() {
        // numeric_value_out_of_range, check_violation, restrict_violation,
        // insufficient_privilege
        for code in ["22003", "23514", "23001", "42501"] {
            assert!(is_permanent_sqlstate(code), "{code}");
        }
        // serialization_failure, deadlock_detected, admin_shutdown
        for code in ["40001", "40P01", "57P01"] {
            assert!(!is_permanent_sqlstate(code), "{code}");
        }
    }

    #[test]
    fn test_errors_without_sqlstate_keep_their_class() {
        let exec = DbErr::Exec(RuntimeErr::Internal("numeric field overflow".into()));
        assert_eq!(sqlstate(&exec), None);
        assert!(matches!(store_error(exec), StoreError::Backend(_)));
    }

    #[test]
    fn test_corrupt_names_column() {
        let err = corrupt("rounding", "unknown rounding policy: nearest-30");
        assert_eq!(
            err,
            StoreError::Corrupt("rounding: unknown rounding policy: nearest-30".into())
        );
        assert!(!err.is_retryable());
    }
}
