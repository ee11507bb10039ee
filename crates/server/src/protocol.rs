//! Request and response bodies for the HTTP API.

use envelope::Envelope;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Compute endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /compute`.
///
/// The `payload` envelope encrypts `{"op": "add"|"mul"|"avg", "a": number,
/// "b": number}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeRequestBody {
    /// Sealed request payload.
    pub payload: Envelope,
}

/// Successful response body for `POST /compute`.
///
/// The `payload` envelope encrypts `{"result": number}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeResponseBody {
    /// Sealed response payload.
    pub payload: Envelope,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
///
/// Messages are generic by design: envelope-level failure detail goes to the
/// log, never to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Whether the AES key currently resolves to valid material.
    pub key_ready: bool,
}
