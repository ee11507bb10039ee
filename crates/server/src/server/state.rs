//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use envelope::KeySource;

/// Application state shared across all request handlers.
///
/// Holds only the key-source capability; the key itself is resolved fresh
/// inside each envelope operation and never cached here.
#[derive(Clone)]
pub struct AppState {
    /// Source of AES key material, resolved per request.
    pub key_source: Arc<dyn KeySource>,
}

impl AppState {
    /// Create a new [`AppState`] around the given key source.
    pub fn new(key_source: Arc<dyn KeySource>) -> Self {
        Self { key_source }
    }
}
