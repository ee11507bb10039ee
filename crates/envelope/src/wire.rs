//! The serialized envelope exchanged between parties.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::cipher::{NONCE_LEN, TAG_LEN};
use crate::error::EnvelopeError;

/// An authenticated ciphertext envelope: `{iv, ct, tag}`, each base64.
///
/// `iv` decodes to exactly 12 bytes, `tag` to exactly 16; `ct` is the same
/// length as the plaintext it encrypts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Base64 of the 12-byte nonce.
    pub iv: String,
    /// Base64 of the ciphertext (tag not included).
    pub ct: String,
    /// Base64 of the 16-byte authentication tag.
    pub tag: String,
}

impl Envelope {
    /// Assemble an envelope from raw parts, base64-encoding each field.
    pub(crate) fn from_parts(
        nonce: &[u8; NONCE_LEN],
        ciphertext: &[u8],
        tag: &[u8; TAG_LEN],
    ) -> Self {
        Self {
            iv: STANDARD.encode(nonce),
            ct: STANDARD.encode(ciphertext),
            tag: STANDARD.encode(tag),
        }
    }

    /// Decode and validate all three fields back to raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Format`] if any field is not valid base64 or
    /// if the decoded nonce/tag lengths are wrong.
    pub(crate) fn decode(
        &self,
    ) -> Result<([u8; NONCE_LEN], Vec<u8>, [u8; TAG_LEN]), EnvelopeError> {
        let iv = decode_field(&self.iv, "iv")?;
        let ct = decode_field(&self.ct, "ct")?;
        let tag = decode_field(&self.tag, "tag")?;

        let iv: [u8; NONCE_LEN] = iv
            .try_into()
            .map_err(|_| EnvelopeError::Format(format!("iv must decode to {NONCE_LEN} bytes")))?;
        let tag: [u8; TAG_LEN] = tag
            .try_into()
            .map_err(|_| EnvelopeError::Format(format!("tag must decode to {TAG_LEN} bytes")))?;

        Ok((iv, ct, tag))
    }
}

fn decode_field(b64: &str, name: &str) -> Result<Vec<u8>, EnvelopeError> {
    STANDARD
        .decode(b64)
        .map_err(|_| EnvelopeError::Format(format!("{name} is not valid base64")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Envelope {
        Envelope::from_parts(&[1u8; NONCE_LEN], &[2u8, 3, 4], &[5u8; TAG_LEN])
    }

    #[test]
    fn parts_round_trip() {
        let (iv, ct, tag) = sample().decode().unwrap();
        assert_eq!(iv, [1u8; NONCE_LEN]);
        assert_eq!(ct, vec![2u8, 3, 4]);
        assert_eq!(tag, [5u8; TAG_LEN]);
    }

    #[test]
    fn serde_uses_short_field_names() {
        let json = serde_json::to_string(&sample()).unwrap();
        for field in ["\"iv\"", "\"ct\"", "\"tag\""] {
            assert!(json.contains(field), "missing {field} in {json}");
        }
    }

    #[test]
    fn rejects_invalid_base64_in_each_field() {
        for field in ["iv", "ct", "tag"] {
            let mut env = sample();
            match field {
                "iv" => env.iv = "*bad*".into(),
                "ct" => env.ct = "*bad*".into(),
                _ => env.tag = "*bad*".into(),
            }
            let err = env.decode().unwrap_err();
            assert!(matches!(err, EnvelopeError::Format(_)), "{field}: {err}");
            assert!(err.to_string().contains(field));
        }
    }

    #[test]
    fn rejects_wrong_nonce_length() {
        let mut env = sample();
        env.iv = STANDARD.encode([0u8; 11]);
        assert!(matches!(env.decode().unwrap_err(), EnvelopeError::Format(_)));
    }

    #[test]
    fn rejects_wrong_tag_length() {
        let mut env = sample();
        env.tag = STANDARD.encode([0u8; 15]);
        assert!(matches!(env.decode().unwrap_err(), EnvelopeError::Format(_)));
    }

    #[test]
    fn empty_ciphertext_is_a_valid_encoding() {
        let env = Envelope::from_parts(&[0u8; NONCE_LEN], &[], &[0u8; TAG_LEN]);
        let (_, ct, _) = env.decode().unwrap();
        assert!(ct.is_empty());
    }
}
