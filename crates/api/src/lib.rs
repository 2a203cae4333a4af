//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - The attendance-change ingestion endpoint
//! - Parent-scoped ledger read routes (JSON, CSV, period summary)
//! - Bearer-token and trigger-secret middleware
//! - Error responses rendered from `AppError`

pub mod error;
pub mod middleware;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use rostra_core::access::AccessPolicy;
use rostra_core::replication::ReplicationOrchestrator;
use rostra_core::store::LedgerStore;
use rostra_shared::JwtService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// JWT service for validating client tokens.
    pub jwt_service: Arc<JwtService>,
    /// Handles attendance changes delivered by the trigger.
    pub orchestrator: Arc<ReplicationOrchestrator>,
    /// Read side of the ledger.
    pub ledger: Arc<dyn LedgerStore>,
    /// Authorization decisions for client reads.
    pub access: Arc<AccessPolicy>,
    /// Shared secret expected in `x-trigger-secret`.
    pub trigger_secret: Arc<str>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
