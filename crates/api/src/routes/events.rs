//! Attendance-change ingestion.
//!
//! The delivery trigger posts one before/after pair per change. Every
//! terminal outcome (written, duplicate, skipped, ignored) answers `200` so
//! the trigger stops redelivering; retryable storage failures answer `503`.

use axum::{Json, Router, extract::State, routing::post};
use serde::Serialize;
use tracing::error;

use crate::AppState;
use crate::error::ApiError;
use rostra_core::attendance::AttendanceChange;
use rostra_core::ledger::WriteOutcome;
use rostra_core::replication::ReplicationOutcome;
use rostra_shared::AppError;
use rostra_shared::types::LedgerLineId;

/// Creates the event routes (requires the trigger middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/events/attendance", post(ingest_attendance_change))
}

/// Body returned for a handled change.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeResponse {
    /// `written`, `duplicate`, `skipped` or `ignored`.
    pub outcome: &'static str,
    /// Skip or ignore code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    /// Ledger line that was created or already existed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_id: Option<LedgerLineId>,
}

impl From<&ReplicationOutcome> for ChangeResponse {
    fn from(outcome: &ReplicationOutcome) -> Self {
        match outcome {
            ReplicationOutcome::Ignored(reason) => Self {
                outcome: "ignored",
                reason: Some(reason.as_str()),
                line_id: None,
            },
            ReplicationOutcome::Skipped(reason) => Self {
                outcome: "skipped",
                reason: Some(reason.as_str()),
                line_id: None,
            },
            ReplicationOutcome::Written(WriteOutcome::Created(line)) => Self {
                outcome: "written",
                reason: None,
                line_id: Some(line.line_id),
            },
            ReplicationOutcome::Written(WriteOutcome::AlreadyExists(line_id)) => Self {
                outcome: "duplicate",
                reason: None,
                line_id: Some(*line_id),
            },
        }
    }
}

/// POST /events/attendance - Replicate one attendance change into the ledger.
async fn ingest_attendance_change(
    State(state): State<AppState>,
    Json(change): Json<AttendanceChange>,
) -> Result<Json<ChangeResponse>, ApiError> {
    match state.orchestrator.handle(&change).await {
        Ok(outcome) => Ok(Json(ChangeResponse::from(&outcome))),
        Err(e) if e.is_retryable() => Err(AppError::Unavailable(e.to_string()).into()),
        Err(e) => {
            error!(error = %e, tenant_id = %change.tenant_id, "Replication failed");
            Err(AppError::Internal(e.to_string()).into())
        }
    }
}
