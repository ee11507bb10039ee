//! Error taxonomy for envelope operations.

use thiserror::Error;

/// Errors produced by the envelope layer.
///
/// The three variants are deliberately distinct so callers must handle key
/// misconfiguration, malformed input, and authentication failure as separate
/// conditions rather than one opaque failure.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Key material is missing or invalid (absent variable, bad base64, or a
    /// decoded length that is not 16, 24, or 32 bytes).
    #[error("key configuration error: {0}")]
    Config(String),

    /// An envelope field was not valid base64, had the wrong decoded length,
    /// or the recovered plaintext was not a JSON object.
    #[error("envelope format error: {0}")]
    Format(String),

    /// Tag verification failed. The message carries no detail: a caller must
    /// not be able to distinguish a wrong key from tampered or corrupted
    /// ciphertext.
    #[error("envelope authentication failed")]
    Authentication,
}

impl EnvelopeError {
    /// Returns `true` for the [`EnvelopeError::Authentication`] variant.
    pub fn is_authentication(&self) -> bool {
        matches!(self, EnvelopeError::Authentication)
    }
}
