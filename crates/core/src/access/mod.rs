//! Tenant isolation for client access.
//!
//! Every request is authorized against the caller's capability and, for
//! tenant documents, the stored membership document. Ledger lines are
//! readable only by the owning parent's administrators and writable by no
//! client at all.
//!
//! - `role` - Member roles and membership documents
//! - `principal` - Authenticated callers
//! - `resource` - Path classification and operations
//! - `policy` - The authorization decision

pub mod error;
pub mod policy;
pub mod principal;
pub mod resource;
pub mod role;

pub use error::AccessError;
pub use policy::AccessPolicy;
pub use principal::Principal;
pub use resource::{Operation, Resource};
pub use role::{MemberRole, Membership};
