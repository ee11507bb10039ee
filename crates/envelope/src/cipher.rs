//! AES-GCM primitives: nonce generation and length-dispatched encrypt/decrypt.
//!
//! The key length selects the cipher (16 → AES-128, 24 → AES-192,
//! 32 → AES-256). A fresh random 96-bit nonce is generated per encryption via
//! the OS CSPRNG; nonce reuse under one key breaks GCM's confidentiality and
//! authentication guarantees, so nonces are never derived or counted.

use aes_gcm::{
    aead::{consts::U12, Aead, KeyInit, OsRng},
    aes::Aes192,
    Aes128Gcm, Aes256Gcm, AesGcm, Nonce,
};

use crate::error::EnvelopeError;
use crate::key::KeyMaterial;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of an AES-GCM authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// AES-192-GCM with the standard 96-bit nonce.
type Aes192Gcm = AesGcm<Aes192, U12>;

/// Generate a fresh random nonce from the OS CSPRNG.
pub(crate) fn random_nonce() -> [u8; NONCE_LEN] {
    use aes_gcm::aead::rand_core::RngCore;
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);
    nonce
}

/// Encrypt `plaintext`, returning ciphertext with the 16-byte tag appended.
///
/// # Errors
///
/// Returns [`EnvelopeError::Config`] on an internal cipher construction
/// failure (unreachable with validated [`KeyMaterial`]).
pub(crate) fn encrypt(
    key: &KeyMaterial,
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
) -> Result<Vec<u8>, EnvelopeError> {
    let nonce = Nonce::from_slice(nonce);
    let result = match key.as_bytes().len() {
        16 => Aes128Gcm::new_from_slice(key.as_bytes())
            .map_err(|_| EnvelopeError::Config("cipher rejected the key length".into()))?
            .encrypt(nonce, plaintext),
        24 => Aes192Gcm::new_from_slice(key.as_bytes())
            .map_err(|_| EnvelopeError::Config("cipher rejected the key length".into()))?
            .encrypt(nonce, plaintext),
        32 => Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|_| EnvelopeError::Config("cipher rejected the key length".into()))?
            .encrypt(nonce, plaintext),
        n => return Err(EnvelopeError::Config(format!("unsupported key length {n}"))),
    };
    // Encryption with a valid key and nonce cannot fail; treat it as a
    // configuration fault rather than panicking.
    result.map_err(|_| EnvelopeError::Config("cipher rejected the encryption input".into()))
}

/// Verify and decrypt `ct_and_tag` (ciphertext with the tag appended).
///
/// # Errors
///
/// Returns [`EnvelopeError::Authentication`] if the tag does not verify —
/// wrong key, tampered ciphertext, and corrupted nonce are indistinguishable
/// by design. No partial plaintext is ever returned.
pub(crate) fn decrypt(
    key: &KeyMaterial,
    nonce: &[u8; NONCE_LEN],
    ct_and_tag: &[u8],
) -> Result<Vec<u8>, EnvelopeError> {
    let nonce = Nonce::from_slice(nonce);
    let result = match key.as_bytes().len() {
        16 => Aes128Gcm::new_from_slice(key.as_bytes())
            .map_err(|_| EnvelopeError::Config("cipher rejected the key length".into()))?
            .decrypt(nonce, ct_and_tag),
        24 => Aes192Gcm::new_from_slice(key.as_bytes())
            .map_err(|_| EnvelopeError::Config("cipher rejected the key length".into()))?
            .decrypt(nonce, ct_and_tag),
        32 => Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|_| EnvelopeError::Config("cipher rejected the key length".into()))?
            .decrypt(nonce, ct_and_tag),
        n => return Err(EnvelopeError::Config(format!("unsupported key length {n}"))),
    };
    result.map_err(|_| EnvelopeError::Authentication)
}
