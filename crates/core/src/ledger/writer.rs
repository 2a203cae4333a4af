//! Idempotent ledger writes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use rostra_shared::types::LedgerLineId;

use crate::ledger::error::LedgerError;
use crate::ledger::line::{LedgerCandidate, LedgerLine};
use crate::store::{CreateResult, LedgerStore};

/// Result of a ledger write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The line was stored.
    Created(LedgerLine),
    /// A line for the same source record already exists; nothing changed.
    AlreadyExists(LedgerLineId),
}

impl WriteOutcome {
    /// Key of the written or pre-existing line.
    #[must_use]
    pub const fn line_id(&self) -> LedgerLineId {
        match self {
            Self::Created(line) => line.line_id,
            Self::AlreadyExists(id) => *id,
        }
    }
}

/// Writes ledger lines with create-if-absent semantics.
///
/// A replayed candidate resolves to the same key, so at most one line per
/// source attendance record exists in a ledger period. Existing lines are
/// never overwritten.
#[derive(Clone)]
pub struct LedgerWriter {
    store: Arc<dyn LedgerStore>,
}

impl LedgerWriter {
    /// Creates a writer over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Writes `candidate`, stamped with the current time.
    pub async fn write(&self, candidate: LedgerCandidate) -> Result<WriteOutcome, LedgerError> {
        self.write_at(candidate, Utc::now()).await
    }

    /// Writes `candidate`, stamped with `created_at`.
    pub async fn write_at(
        &self,
        candidate: LedgerCandidate,
        created_at: DateTime<Utc>,
    ) -> Result<WriteOutcome, LedgerError> {
        let line = candidate.into_line(created_at)?;
        debug!(path = %line.path(), "Writing ledger line");

        match self.store.create_if_absent(&line).await? {
            CreateResult::Created => {
                info!(
                    parent_id = %line.parent_id,
                    period_id = %line.period_id,
                    line_id = %line.line_id,
                    source_attendance_id = %line.source_attendance_id,
                    amount = %line.amount,
                    "Ledger line created"
                );
                Ok(WriteOutcome::Created(line))
            }
            CreateResult::AlreadyExists => {
                info!(
                    parent_id = %line.parent_id,
                    period_id = %line.period_id,
                    line_id = %line.line_id,
                    source_attendance_id = %line.source_attendance_id,
                    "Ledger line already exists, skipping"
                );
                Ok(WriteOutcome::AlreadyExists(line.line_id))
            }
        }
    }
}
