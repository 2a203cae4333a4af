//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - `PostgreSQL` implementations of the `rostra-core` storage traits
//! - Database migrations, including the append-only and row-level
//!   security rules for the ledger

pub mod entities;
pub mod migration;
pub mod repositories;
pub mod rls;

pub use repositories::{
    ContractRepository, LedgerRepository, MembershipRepository, OrganizationRepository,
};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use rostra_shared::config::DatabaseConfig;

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Connects with the pool limits from configuration.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with_config(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .sqlx_logging(false);
    Database::connect(options).await
}
