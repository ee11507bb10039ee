//! Axum request handlers for all service endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::compute::{self, ComputeRequest};
use crate::protocol::{ComputeRequestBody, ComputeResponseBody, ErrorResponse, HealthResponse};
use envelope::EnvelopeError;

use super::state::AppState;

/// `POST /compute` — open the sealed request, apply the operation, and
/// return the sealed result.
///
/// The decrypted payload must be `{"op": "add"|"mul"|"avg", "a": number,
/// "b": number}`; missing operands default to 0. The response payload is
/// `{"result": number}` sealed under the same key source.
pub async fn compute(
    State(state): State<AppState>,
    Json(req): Json<ComputeRequestBody>,
) -> Response {
    // 1. Open the request envelope.
    let payload = match envelope::open(state.key_source.as_ref(), &req.payload) {
        Ok(p) => p,
        Err(e) => return envelope_failure("open", &e),
    };

    // 2. Interpret the decrypted payload.
    let request: ComputeRequest =
        match serde_json::from_value(serde_json::Value::Object(payload)) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "decrypted payload is not a valid compute request");
                let err = ErrorResponse::new("bad_request", "unknown op");
                return (StatusCode::BAD_REQUEST, Json(err)).into_response();
            }
        };

    // 3. Compute and seal the result.
    let result = compute::apply(request.op, request.a, request.b);
    let mut out = envelope::Payload::new();
    out.insert("result".into(), result.into());

    match envelope::seal(state.key_source.as_ref(), &out) {
        Ok(sealed) => {
            let body = ComputeResponseBody { payload: sealed };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => envelope_failure("seal", &e),
    }
}

/// `GET /health` — liveness and readiness check.
///
/// Returns `200 OK` when the AES key resolves to valid material, `503
/// Service Unavailable` otherwise. The key is resolved and dropped; it is
/// not cached or reported.
pub async fn health(State(state): State<AppState>) -> Response {
    let key_ready = state.key_source.resolve().is_ok();
    let (status_code, status_str) = if key_ready {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status: status_str.into(),
        key_ready,
    };
    (status_code, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

/// Map an [`EnvelopeError`] to an HTTP response.
///
/// Failure detail is logged; response bodies stay generic so callers learn
/// nothing about key state or why verification failed.
fn envelope_failure(operation: &str, err: &EnvelopeError) -> Response {
    warn!(error = %err, operation, "envelope operation failed");
    let (status, body) = match err {
        EnvelopeError::Format(_) => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("bad_request", "malformed envelope"),
        ),
        EnvelopeError::Authentication => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("unauthenticated", "envelope authentication failed"),
        ),
        EnvelopeError::Config(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("internal_error", "encryption key unavailable"),
        ),
    };
    (status, Json(body)).into_response()
}
