//! The parent's append-only billing ledger.
//!
//! - `line` - Ledger lines and write candidates
//! - `writer` - Idempotent create-if-absent writes
//! - `summary` - Per-period totals
//! - `error` - Write errors

pub mod error;
pub mod line;
pub mod summary;
pub mod writer;

pub use error::LedgerError;
pub use line::{LedgerCandidate, LedgerLine};
pub use summary::{PeriodSummary, SubOrgTotals};
pub use writer::{LedgerWriter, WriteOutcome};
