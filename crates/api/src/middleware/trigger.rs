//! Shared-secret check for the change-delivery trigger.

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::AppState;

/// Header carrying the trigger's shared secret.
pub const TRIGGER_SECRET_HEADER: &str = "x-trigger-secret";

/// Constant-time comparison. An empty configured secret matches nothing.
fn secrets_match(presented: &[u8], expected: &[u8]) -> bool {
    !expected.is_empty() && presented.ct_eq(expected).unwrap_u8() == 1
}

/// Rejects requests whose `x-trigger-secret` does not match configuration.
pub async fn trigger_secret_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(TRIGGER_SECRET_HEADER)
        .map(|v| v.as_bytes());

    match presented {
        Some(secret) if secrets_match(secret, state.trigger_secret.as_bytes()) => {
            next.run(request).await
        }
        _ => {
            warn!(uri = %request.uri(), "Rejected trigger delivery with bad secret");
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_trigger_secret",
                    "message": "A valid x-trigger-secret header is required"
                })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secrets_match() {
        assert!(secrets_match(b"s3cret", b"s3cret"));
        assert!(!secrets_match(b"s3cret", b"s3creT"));
        assert!(!secrets_match(b"s3cre", b"s3cret"));
        assert!(!secrets_match(b"", b"s3cret"));
        assert!(!secrets_match(b"", b""));
    }

    #[test]
    fn test_secrets_match_rejects_prefix_and_extension() {
        assert!(!secrets_match(b"s3cret-and-more", b"s3cret"));
        assert!(!secrets_match(b"s3c", b"s3cret"));
        assert!(!secrets_match(b"S3CRET", b"s3cret"));
    }
}
