//! Database migration runner for Rostra.
//!
//! Reads `DATABASE_URL` (from the environment or `.env`). Run migrations as
//! the table owner; the service itself should connect as a role without
//! `BYPASSRLS` so the ledger's row-level security applies.
//!
//! Usage:
//!   migrator up      - Run all pending migrations
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations

use rostra_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(Migrator).await;
}
