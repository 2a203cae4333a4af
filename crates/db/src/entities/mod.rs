//! `SeaORM` entities.

pub mod contracts;
pub mod ledger_lines;
pub mod memberships;
pub mod organizations;

/// Common entity imports.
pub mod prelude {
    pub use super::contracts::Entity as Contracts;
    pub use super::ledger_lines::Entity as LedgerLines;
    pub use super::memberships::Entity as Memberships;
    pub use super::organizations::Entity as Organizations;
}
