//! Shared types, errors, and configuration for Rostra.
//!
//! This crate provides common types used across all other crates:
//! - Typed, path-safe document identifiers
//! - Derived ledger line ids and pseudonymous staff references
//! - Capability claims and JWT validation
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::{Capability, Claims};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
