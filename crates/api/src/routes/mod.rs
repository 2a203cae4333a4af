//! API route definitions.

use axum::{Router, middleware};

use crate::AppState;
use crate::middleware::{auth_middleware, trigger_secret_middleware};

pub mod events;
pub mod health;
pub mod ledgers;

/// Creates the API router. Ledger routes require a bearer token; the event
/// endpoint requires the trigger secret.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let client_routes = ledgers::routes().layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    let trigger_routes = events::routes().layer(middleware::from_fn_with_state(
        state,
        trigger_secret_middleware,
    ));

    Router::new()
        .merge(health::routes())
        .merge(client_routes)
        .merge(trigger_routes)
}
