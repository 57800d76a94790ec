//! HMAC-SHA256 signature engine.
//!
//! Signed content is `{msg_id}.{timestamp}.{payload}`; the token is
//! `v1,` followed by the padded standard-base64 digest.

use crate::error::{Result, WebhookError};
use crate::key::SigningKey;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// The only version this crate produces.
pub const SIGNATURE_VERSION: &str = "v1";

/// Build the exact byte sequence the HMAC is computed over.
pub fn canonical_content(msg_id: &str, timestamp: u64, payload: &[u8]) -> Vec<u8> {
    let timestamp = timestamp.to_string();
    let mut content = Vec::with_capacity(msg_id.len() + timestamp.len() + payload.len() + 2);
    content.extend_from_slice(msg_id.as_bytes());
    content.push(b'.');
    content.extend_from_slice(timestamp.as_bytes());
    content.push(b'.');
    content.extend_from_slice(payload);
    content
}

/// Keyed signer. The MAC is keyed once and cloned per call.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha256,
}

impl Signer {
    pub fn new(key: &SigningKey) -> Result<Self> {
        let mac = HmacSha256::new_from_slice(key.as_bytes())
            .map_err(|e| WebhookError::InvalidKey(format!("unusable HMAC key: {e}")))?;
        Ok(Self { mac })
    }

    /// Raw 32-byte digest over the canonical content.
    pub fn digest(&self, msg_id: &str, timestamp: u64, payload: &[u8]) -> [u8; 32] {
        let mut mac = self.mac.clone();
        mac.update(&canonical_content(msg_id, timestamp, payload));
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&mac.finalize().into_bytes());
        digest
    }

    /// Digest in padded standard base64, without the version prefix.
    pub fn encoded_digest(&self, msg_id: &str, timestamp: u64, payload: &[u8]) -> String {
        STANDARD.encode(self.digest(msg_id, timestamp, payload))
    }

    /// Full `v1,<base64>` token.
    pub fn sign(&self, msg_id: &str, timestamp: u64, payload: &[u8]) -> String {
        format!(
            "{SIGNATURE_VERSION},{}",
            self.encoded_digest(msg_id, timestamp, payload)
        )
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("algorithm", &"HMAC-SHA256")
            .finish_non_exhaustive()
    }
}

/// Split a token at its first comma into `(version, digest)`.
pub fn split_token(token: &str) -> Option<(&str, &str)> {
    token.split_once(',')
}

/// Constant-time equality over equal-length inputs.
///
/// A length mismatch returns early; lengths are not secret. Otherwise every
/// byte pair is folded into the accumulator with no data-dependent branch.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }

    let mut acc = 0u8;
    for (x, y) in a.iter().zip(b) {
        acc |= x ^ y;
    }
    acc == 0
}
