//! Attendance-to-ledger replication.
//!
//! - `orchestrator` - Handles one change event end to end
//! - `outcome` - Ignore/skip/write results and retryable errors

pub mod orchestrator;
pub mod outcome;


pub use orchestrator::ReplicationOrchestrator;
pub use outcome::{IgnoreReason, ReplicationError, ReplicationOutcome, SkipReason};
