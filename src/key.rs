//! Signing key material.
//!
//! Secrets are distributed as base64, optionally carrying the `whsec_`
//! prefix. Raw bytes are accepted as-is.

use crate::error::{Result, WebhookError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub const SECRET_PREFIX: &str = "whsec_";

/// Decoded HMAC key. Never empty; wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningKey {
    bytes: Vec<u8>,
}

impl SigningKey {
    /// Decode a base64 secret, with or without the `whsec_` prefix.
    pub fn from_secret(secret: &str) -> Result<Self> {
        let encoded = secret.strip_prefix(SECRET_PREFIX).unwrap_or(secret);
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| WebhookError::InvalidKey(format!("secret is not valid base64: {e}")))?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(WebhookError::InvalidKey("key must not be empty".into()));
        }
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

impl FromStr for SigningKey {
    type Err = WebhookError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_secret(s)
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("bytes", &"[REDACTED]")
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const SECRET: &str = "MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw";

    #[test]
    fn prefixed_and_bare_secrets_decode_identically() {
        let bare = SigningKey::from_secret(SECRET).unwrap();
        let prefixed = SigningKey::from_secret(&format!("whsec_{SECRET}")).unwrap();
        assert_eq!(bare.as_bytes(), prefixed.as_bytes());
        assert_eq!(bare.len(), 24);
    }

    #[test]
    fn raw_bytes_are_used_verbatim() {
        let key = SigningKey::from_bytes(b"raw-secret".to_vec()).unwrap();
        assert_eq!(key.as_bytes(), b"raw-secret");
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let err = SigningKey::from_secret("whsec_not base64!").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(SigningKey::from_secret("").is_err());
        assert!(SigningKey::from_secret("whsec_").is_err());
        assert!(SigningKey::from_bytes(Vec::new()).is_err());
    }

    #[test]
    fn prefix_is_only_stripped_once() {
        // `_` is outside the standard alphabet.
        assert!(SigningKey::from_secret("whsec_whsec_AAAA").is_err());
    }

    #[test]
    fn from_str_parses_secret() {
        let key: SigningKey = SECRET.parse().unwrap();
        assert_eq!(key.len(), 24);
    }

    #[test]
    fn debug_redacts_key_bytes() {
        let key = SigningKey::from_bytes(b"super-secret".to_vec()).unwrap();
        let rendered = format!("{key:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("super-secret"));
    }
}
