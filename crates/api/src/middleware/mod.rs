//! Request middleware.

pub mod auth;
pub mod trigger;

pub use auth::{AuthUser, auth_middleware};
pub use trigger::{TRIGGER_SECRET_HEADER, trigger_secret_middleware};
