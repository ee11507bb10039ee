//! AES-GCM authenticated-encryption envelope.
//!
//! A [`Payload`] (JSON object) is serialized to compact JSON, encrypted under
//! a key resolved from a [`KeySource`], and carried as an [`Envelope`]:
//!
//! ```text
//! {"iv": base64(12-byte nonce), "ct": base64(ciphertext), "tag": base64(16-byte tag)}
//! ```
//!
//! The key is re-resolved on every call and never cached. No associated data
//! is bound into the tag: the envelope authenticates the JSON blob but not
//! its context, so replay protection is a caller concern.
//!
//! This crate is intentionally free of HTTP and async dependencies.

pub mod cipher;
pub mod error;
pub mod key;
pub mod wire;

pub use cipher::{NONCE_LEN, TAG_LEN};
pub use error::EnvelopeError;
pub use key::{EnvKeySource, KeyMaterial, KeySource, StaticKeySource, DEFAULT_KEY_VAR};
pub use wire::Envelope;

/// The plaintext logical content of an envelope: a JSON object. The envelope
/// enforces no schema; that belongs to the caller.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Encrypt `payload` into an [`Envelope`] under a freshly resolved key.
///
/// The payload is serialized as compact JSON (no extra whitespace, insertion
/// key order) and encrypted with AES-GCM under a fresh random nonce.
///
/// # Errors
///
/// Returns [`EnvelopeError::Config`] if the key cannot be resolved.
pub fn seal(source: &dyn KeySource, payload: &Payload) -> Result<Envelope, EnvelopeError> {
    let key = source.resolve()?;
    let plaintext = serde_json::to_vec(payload)
        .map_err(|e| EnvelopeError::Format(format!("payload is not serialisable: {e}")))?;

    let nonce = cipher::random_nonce();
    let mut ciphertext = cipher::encrypt(&key, &nonce, &plaintext)?;

    // The cipher appends the tag; the wire format carries it detached.
    let tag_bytes = ciphertext.split_off(ciphertext.len() - TAG_LEN);
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&tag_bytes);

    Ok(Envelope::from_parts(&nonce, &ciphertext, &tag))
}

/// Verify and decrypt `envelope` back into its [`Payload`].
///
/// A single atomic verify-then-decrypt: on any failure nothing of the
/// plaintext is returned.
///
/// # Errors
///
/// - [`EnvelopeError::Format`] — a field is not valid base64, the decoded
///   nonce/tag lengths are wrong, or the plaintext is not a JSON object.
/// - [`EnvelopeError::Config`] — the key cannot be resolved.
/// - [`EnvelopeError::Authentication`] — the tag does not verify.
pub fn open(source: &dyn KeySource, envelope: &Envelope) -> Result<Payload, EnvelopeError> {
    let (nonce, mut ct_and_tag, tag) = envelope.decode()?;
    ct_and_tag.extend_from_slice(&tag);

    let key = source.resolve()?;
    let plaintext = cipher::decrypt(&key, &nonce, &ct_and_tag)?;

    let value: serde_json::Value = serde_json::from_slice(&plaintext)
        .map_err(|_| EnvelopeError::Format("plaintext is not valid JSON".into()))?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(EnvelopeError::Format("plaintext is not a JSON object".into())),
    }
}
