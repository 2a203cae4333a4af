//! Ledger write errors.

use thiserror::Error;

use crate::billing::BillingError;
use crate::store::StoreError;

/// Errors that can occur while writing a ledger line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The line amount could not be computed.
    #[error("Cannot price ledger line: {0}")]
    Billing(#[from] BillingError),

    /// The ledger store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Returns true if repeating the write may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Billing(_) => false,
            Self::Store(e) => e.is_retryable(),
        }
    }
}
