//! Parent-scoped ledger reads.
//!
//! Every route authorizes the caller against the ledger resource before
//! touching storage, so a member token or another parent's token never
//! reaches the store.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::header::CONTENT_TYPE,
    response::IntoResponse,
    routing::get,
};

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use rostra_core::access::{Operation, Resource};
use rostra_core::export::ledger_csv;
use rostra_core::ledger::{LedgerLine, PeriodSummary};
use rostra_shared::AppError;
use rostra_shared::types::{LedgerLineId, ParentId, PeriodId};

/// Creates the ledger routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/parents/{parent_id}/ledgers/{period_id}/lines",
            get(list_lines),
        )
        .route(
            "/parents/{parent_id}/ledgers/{period_id}/lines.csv",
            get(export_lines_csv),
        )
        .route(
            "/parents/{parent_id}/ledgers/{period_id}/lines/{line_id}",
            get(get_line),
        )
        .route(
            "/parents/{parent_id}/ledgers/{period_id}/summary",
            get(get_summary),
        )
}

async fn authorize_read(
    state: &AppState,
    auth: &AuthUser,
    parent_id: &ParentId,
    period_id: &PeriodId,
    line_id: Option<LedgerLineId>,
) -> Result<(), ApiError> {
    let principal = auth.principal()?;
    let resource = Resource::LedgerLines {
        parent_id: parent_id.clone(),
        period_id: period_id.clone(),
        line_id,
    };
    state
        .access
        .authorize(&principal, Operation::Read, &resource)
        .await?;
    Ok(())
}

/// GET /parents/{parent_id}/ledgers/{period_id}/lines - List a period's lines.
async fn list_lines(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((parent_id, period_id)): Path<(ParentId, PeriodId)>,
) -> Result<Json<Vec<LedgerLine>>, ApiError> {
    authorize_read(&state, &auth, &parent_id, &period_id, None).await?;
    let lines = state.ledger.list_lines(&parent_id, &period_id).await?;
    Ok(Json(lines))
}

/// GET /parents/{parent_id}/ledgers/{period_id}/lines.csv - Export a period as CSV.
async fn export_lines_csv(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((parent_id, period_id)): Path<(ParentId, PeriodId)>,
) -> Result<impl IntoResponse, ApiError> {
    authorize_read(&state, &auth, &parent_id, &period_id, None).await?;
    let lines = state.ledger.list_lines(&parent_id, &period_id).await?;
    Ok(([(CONTENT_TYPE, "text/csv; charset=utf-8")], ledger_csv(&lines)))
}

/// GET /parents/{parent_id}/ledgers/{period_id}/lines/{line_id} - Fetch one line.
async fn get_line(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((parent_id, period_id, line_id)): Path<(ParentId, PeriodId, LedgerLineId)>,
) -> Result<Json<LedgerLine>, ApiError> {
    authorize_read(&state, &auth, &parent_id, &period_id, Some(line_id)).await?;
    state
        .ledger
        .get_line(&parent_id, &period_id, line_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("ledger line {line_id}")).into())
}

/// GET /parents/{parent_id}/ledgers/{period_id}/summary - Period totals per sub-organization.
async fn get_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((parent_id, period_id)): Path<(ParentId, PeriodId)>,
) -> Result<Json<PeriodSummary>, ApiError> {
    authorize_read(&state, &auth, &parent_id, &period_id, None).await?;
    let lines = state.ledger.list_lines(&parent_id, &period_id).await?;
    Ok(Json(PeriodSummary::from_lines(parent_id, period_id, &lines)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header::AUTHORIZATION},
        response::Response,
    };
    use rstest::rstest;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tower::ServiceExt;

    use super::*;
    use crate::create_router;
    use crate::middleware::TRIGGER_SECRET_HEADER;
    use crate::test_support::{
        TRIGGER_SECRET, approval_change, body_bytes, body_json, member_token, parent_admin_token,
        seeded_store, test_state,
    };
    use rostra_core::export::LEDGER_CSV_HEADER;
    use rostra_core::store::InMemoryStore;

    const LINES: &str = "/api/v1/parents/P1/ledgers/2026-W02/lines";

    /// Store holding one 8-hour line for `att-1` in P1's 2026-W02 ledger.
    async fn store_with_line() -> Arc<InMemoryStore> {
        let store = seeded_store().await;
        let response = create_router(test_state(&store))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/events/attendance")
                    .header("Content-Type", "application/json")
                    .header(TRIGGER_SECRET_HEADER, TRIGGER_SECRET)
                    .body(Body::from(approval_change("att-1").to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        store
    }

    async fn get(store: &Arc<InMemoryStore>, uri: &str, token: Option<String>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        create_router(test_state(store))
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    fn decimal(value: &serde_json::Value) -> Decimal {
        value.as_str().unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn test_requires_bearer_token() {
        let store = store_with_line().await;

        let response = get(&store, LINES, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = get(&store, LINES, Some("not-a-jwt".to_string())).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "invalid_token");
    }

    #[tokio::test]
    async fn test_parent_admin_lists_own_lines() {
        let store = store_with_line().await;
        let token = parent_admin_token(&test_state(&store), "P1");

        let response = get(&store, LINES, Some(token)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let lines = body.as_array().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["sourceAttendanceId"], "att-1");
        assert_eq!(lines[0]["subOrgId"], "org-1");
        assert_eq!(decimal(&lines[0]["hours"]), dec!(8));
        assert_eq!(decimal(&lines[0]["amount"]), dec!(240));
        assert!(lines[0].get("staffId").is_none());
    }

    #[rstest]
    #[case::other_parent("parent")]
    #[case::tenant_owner("owner")]
    #[case::tenant_staff("staff")]
    #[tokio::test]
    async fn test_other_callers_are_forbidden(#[case] caller: &str) {
        let store = store_with_line().await;
        let state = test_state(&store);
        let token = match caller {
            "parent" => parent_admin_token(&state, "P2"),
            role => member_token(&state, role),
        };

        for uri in [
            LINES.to_string(),
            format!("{LINES}.csv"),
            "/api/v1/parents/P1/ledgers/2026-W02/summary".to_string(),
        ] {
            let response = get(&store, &uri, Some(token.clone())).await;
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
            assert_eq!(body_json(response).await["error"], "FORBIDDEN");
        }
    }

    #[tokio::test]
    async fn test_csv_export() {
        let store = store_with_line().await;
        let token = parent_admin_token(&test_state(&store), "P1");

        let response = get(&store, &format!("{LINES}.csv"), Some(token)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/csv")
        );

        let body = String::from_utf8(body_bytes(response).await).unwrap();
        let rows: Vec<&str> = body.lines().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], LEDGER_CSV_HEADER);
        assert!(rows[1].starts_with("P1,org-1,"));
        assert!(rows[1].contains(",2026-W02,"));
    }

    #[tokio::test]
    async fn test_summary() {
        let store = store_with_line().await;
        let token = parent_admin_token(&test_state(&store), "P1");

        let response = get(
            &store,
            "/api/v1/parents/P1/ledgers/2026-W02/summary",
            Some(token),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["lineCount"], 1);
        assert_eq!(decimal(&body["totalAmount"]), dec!(240));
        assert_eq!(body["subOrgs"][0]["subOrgId"], "org-1");
    }

    #[tokio::test]
    async fn test_get_single_line() {
        let store = store_with_line().await;
        let token = parent_admin_token(&test_state(&store), "P1");
        let line_id = LedgerLineId::derive(
            &ParentId::new("P1").unwrap(),
            &PeriodId::new("2026-W02").unwrap(),
            &rostra_shared::types::AttendanceId::new("att-1").unwrap(),
        );

        let response = get(&store, &format!("{LINES}/{line_id}"), Some(token.clone())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["lineId"], line_id.to_string());

        let missing = LedgerLineId::derive(
            &ParentId::new("P1").unwrap(),
            &PeriodId::new("2026-W02").unwrap(),
            &rostra_shared::types::AttendanceId::new("att-404").unwrap(),
        );
        let response = get(&store, &format!("{LINES}/{missing}"), Some(token)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_empty_period_lists_nothing() {
        let store = store_with_line().await;
        let token = parent_admin_token(&test_state(&store), "P1");

        let response = get(
            &store,
            "/api/v1/parents/P1/ledgers/2026-W03/lines",
            Some(token),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_store_outage_is_service_unavailable() {
        let store = store_with_line().await;
        let token = parent_admin_token(&test_state(&store), "P1");
        store.fail_next_reads(1);

        let response = get(&store, LINES, Some(token)).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
