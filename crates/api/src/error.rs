//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use rostra_core::access::AccessError;
use rostra_core::attendance::AttendanceError;
use rostra_core::store::StoreError;
use rostra_shared::AppError;

/// Wrapper that renders an [`AppError`] as `{"error": code, "message": ..}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => Self(AppError::Unavailable(msg)),
            StoreError::Corrupt(msg) | StoreError::Rejected(msg) | StoreError::Backend(msg) => {
                Self(AppError::Database(msg))
            }
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Denied(reason) => Self(AppError::Forbidden(reason.to_string())),
            AccessError::UnknownRole(role) => {
                Self(AppError::Forbidden(format!("unknown role: {role}")))
            }
            AccessError::InvalidWrite(e @ AttendanceError::RoleNotPermitted { .. }) => {
                Self(AppError::Forbidden(e.to_string()))
            }
            AccessError::InvalidWrite(e) => Self(AppError::Validation(e.to_string())),
            AccessError::Store(e) => e.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }
        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}
