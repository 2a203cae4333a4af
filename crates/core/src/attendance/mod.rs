//! Attendance records as delivered by the tenant application.
//!
//! - `types` - Snapshots, status, and the before/after change event
//! - `validation` - Client write rules for attendance documents

pub mod types;
pub mod validation;

pub use types::{AttendanceChange, AttendanceEvent, AttendanceStatus};
pub use validation::{AttendanceError, validate_create, validate_update};
