//! Core replication logic for Rostra.
//!
//! This crate contains the billing pipeline with ZERO web or database
//! dependencies. Storage is reached only through the traits in [`store`],
//! injected into each component.
//!
//! # Modules
//!
//! - `attendance` - Attendance snapshots, change events and write rules
//! - `contract` - Billing contracts and parent/contract resolution
//! - `billing` - Billable hours, period ids and line amounts
//! - `ledger` - Append-only ledger lines and the idempotent writer
//! - `replication` - The approval-to-ledger orchestrator
//! - `access` - Tenant isolation policy
//! - `export` - CSV export of ledger lines
//! - `store` - Storage traits and the in-memory store

pub mod access;
pub mod attendance;
pub mod billing;
pub mod contract;
pub mod export;
pub mod ledger;
pub mod replication;
pub mod store;
