//! Router fixtures over the in-memory store.

use std::sync::Arc;

use axum::{body::Body, response::Response};
use http_body_util::BodyExt;
use rust_decimal_macros::dec;
use serde_json::{Value, json};

use crate::AppState;
use rostra_core::access::AccessPolicy;
use rostra_core::billing::PeriodDeriver;
use rostra_core::contract::{Contract, ContractResolver, PeriodType, RoundingPolicy};
use rostra_core::ledger::LedgerWriter;
use rostra_core::replication::ReplicationOrchestrator;
use rostra_core::store::InMemoryStore;
use rostra_shared::types::{OrgId, ParentId, UserId};
use rostra_shared::{Capability, JwtConfig, JwtService};

pub(crate) const TRIGGER_SECRET: &str = "test-trigger-secret";

pub(crate) fn parent() -> ParentId {
    ParentId::new("P1").unwrap()
}

pub(crate) fn org() -> OrgId {
    OrgId::new("org-1").unwrap()
}

/// Store with `org-1` under `P1` and a weekly, unrounded contract at 30/h.
pub(crate) async fn seeded_store() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    store.set_parent(org(), parent()).await;
    store
        .put_contract(Contract {
            parent_id: parent(),
            sub_org_id: org(),
            bill_rate: dec!(30),
            rounding: RoundingPolicy::None,
            period: PeriodType::Weekly,
        })
        .await;
    store
}

pub(crate) fn test_state(store: &Arc<InMemoryStore>) -> AppState {
    let jwt_service = JwtService::new(JwtConfig {
        secret: "test-secret-key-for-testing".to_string(),
        access_token_expires_minutes: 15,
    });
    let orchestrator = ReplicationOrchestrator::new(
        ContractResolver::new(store.clone(), store.clone()),
        PeriodDeriver::default(),
        LedgerWriter::new(store.clone()),
    );

    AppState {
        jwt_service: Arc::new(jwt_service),
        orchestrator: Arc::new(orchestrator),
        ledger: store.clone(),
        access: Arc::new(AccessPolicy::new(store.clone())),
        trigger_secret: Arc::from(TRIGGER_SECRET),
    }
}

pub(crate) fn parent_admin_token(state: &AppState, parent_id: &str) -> String {
    state
        .jwt_service
        .generate_access_token(
            UserId::new("admin-1").unwrap(),
            Capability::ParentAdmin {
                parent_id: ParentId::new(parent_id).unwrap(),
            },
        )
        .expect("should generate token")
}

pub(crate) fn member_token(state: &AppState, role: &str) -> String {
    state
        .jwt_service
        .generate_access_token(
            UserId::new("user-1").unwrap(),
            Capability::Member {
                org_id: org(),
                role: role.to_string(),
            },
        )
        .expect("should generate token")
}

/// An 8-hour shift on Monday 2026-01-05 moving from pending to approved.
pub(crate) fn approval_change(attendance_id: &str) -> Value {
    let record = |status: &str| {
        json!({
            "id": attendance_id,
            "orgId": "org-1",
            "staffId": "staff-1",
            "venueId": "venue-1",
            "clockIn": "2026-01-05T09:00:00Z",
            "clockOut": "2026-01-05T17:00:00Z",
            "status": status
        })
    };
    json!({
        "tenantId": "org-1",
        "before": record("pending"),
        "after": record("approved")
    })
}

pub(crate) async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub(crate) async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
