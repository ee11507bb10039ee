//! Key material and key resolution.
//!
//! The key is re-resolved on every seal/open call rather than cached, so an
//! externally rotated key takes effect without a restart. Resolution is a
//! capability ([`KeySource`]) injected into the envelope operations, which
//! lets tests supply deterministic key material without touching the real
//! process environment.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::EnvelopeError;

/// Environment variable holding the base64-encoded AES key by default.
pub const DEFAULT_KEY_VAR: &str = "APP_AES_KEY";

/// Accepted raw key lengths in bytes (AES-128, AES-192, AES-256).
pub const KEY_LENS: [usize; 3] = [16, 24, 32];

/// Raw symmetric key bytes, validated to one of [`KEY_LENS`].
///
/// When this type is dropped, the memory is overwritten with zeroes to
/// minimise the window during which plaintext key material lives in RAM.
#[derive(Clone)]
pub struct KeyMaterial(Vec<u8>);

impl KeyMaterial {
    /// Wrap raw key bytes, validating their length.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Config`] if the length is not 16, 24, or 32.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, EnvelopeError> {
        if !KEY_LENS.contains(&bytes.len()) {
            return Err(EnvelopeError::Config(format!(
                "key must be 16, 24, or 32 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self(bytes))
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        // Zero the key material on drop.
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("KeyMaterial([REDACTED])")
    }
}

/// Source of key material, resolved fresh for every envelope operation.
pub trait KeySource: Send + Sync {
    /// Resolve the current key.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Config`] when no valid key is available.
    fn resolve(&self) -> Result<KeyMaterial, EnvelopeError>;
}

/// Production [`KeySource`]: a base64 value in the process environment.
///
/// Each resolution first loads a local `.env` file if one exists. Loading is
/// idempotent, never fails the call, and never overwrites variables already
/// set in the process environment.
#[derive(Debug, Clone)]
pub struct EnvKeySource {
    var: String,
}

impl EnvKeySource {
    /// Read the key from the named environment variable.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvKeySource {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_VAR)
    }
}

impl KeySource for EnvKeySource {
    fn resolve(&self) -> Result<KeyMaterial, EnvelopeError> {
        // Missing .env file is fine; set vars are never overwritten.
        let _ = dotenvy::dotenv();

        let b64 = std::env::var(&self.var)
            .map_err(|_| EnvelopeError::Config(format!("{} not set in environment", self.var)))?;
        let bytes = STANDARD
            .decode(b64.trim())
            .map_err(|_| EnvelopeError::Config(format!("{} is not valid base64", self.var)))?;
        KeyMaterial::from_bytes(bytes)
    }
}

/// Fixed-key [`KeySource`] for tests and embedders that manage key material
/// themselves.
#[derive(Debug, Clone)]
pub struct StaticKeySource {
    key: KeyMaterial,
}

impl StaticKeySource {
    /// Hold a copy of `key` and serve it on every resolution.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Config`] if `key` is not 16, 24, or 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self, EnvelopeError> {
        Ok(Self {
            key: KeyMaterial::from_bytes(key.to_vec())?,
        })
    }
}

impl KeySource for StaticKeySource {
    fn resolve(&self) -> Result<KeyMaterial, EnvelopeError> {
        Ok(self.key.clone())
    }
}
