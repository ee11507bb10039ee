//! Axum router construction.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::{handlers, middleware, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/compute", post(handlers::compute))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(middleware::REQUEST_TIMEOUT))
        .layer(CompressionLayer::new())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ComputeRequestBody, ComputeResponseBody};
    use crate::server::state::testing::fixed_key_state;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use envelope::StaticKeySource;
    use serde_json::json;
    use tower::ServiceExt;

    fn sealed_request(source: &StaticKeySource, payload: serde_json::Value) -> Request<Body> {
        let payload = payload.as_object().unwrap().clone();
        let body = ComputeRequestBody {
            payload: envelope::seal(source, &payload).unwrap(),
        };
        Request::builder()
            .method("POST")
            .uri("/compute")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let (state, _) = fixed_key_state();
        let app = build(state);
        let req = Request::builder()
            .uri("/unknown")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_route_reports_ok() {
        let (state, _) = fixed_key_state();
        let app = build(state);
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn compute_round_trip_through_the_envelope() {
        let (state, source) = fixed_key_state();
        let app = build(state);

        let req = sealed_request(&source, json!({"op": "avg", "a": 40.0, "b": 45.0}));
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: ComputeResponseBody = serde_json::from_slice(&bytes).unwrap();
        let result = envelope::open(&source, &body.payload).unwrap();
        assert_eq!(result.get("result"), Some(&json!(42.5)));
    }

    #[tokio::test]
    async fn operands_default_to_zero() {
        let (state, source) = fixed_key_state();
        let app = build(state);

        let req = sealed_request(&source, json!({"op": "add", "a": 7}));
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: ComputeResponseBody = serde_json::from_slice(&bytes).unwrap();
        let result = envelope::open(&source, &body.payload).unwrap();
        assert_eq!(result.get("result"), Some(&json!(7.0)));
    }

    #[tokio::test]
    async fn unknown_op_returns_400() {
        let (state, source) = fixed_key_state();
        let app = build(state);

        let req = sealed_request(&source, json!({"op": "div", "a": 1, "b": 2}));
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn envelope_sealed_under_another_key_returns_400() {
        let (state, _) = fixed_key_state();
        let app = build(state);

        let other = StaticKeySource::new(&[0x99u8; 32]).unwrap();
        let req = sealed_request(&other, json!({"op": "add", "a": 1, "b": 2}));
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // The body must not hint at why verification failed.
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!text.contains("key"), "response leaks key detail: {text}");
    }

    #[tokio::test]
    async fn malformed_base64_returns_400() {
        let (state, source) = fixed_key_state();
        let app = build(state);

        let payload = json!({"op": "add", "a": 1, "b": 2}).as_object().unwrap().clone();
        let mut sealed = envelope::seal(&source, &payload).unwrap();
        sealed.ct = "*not base64*".into();
        let body = ComputeRequestBody { payload: sealed };
        let req = Request::builder()
            .method("POST")
            .uri("/compute")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
