//! Signing and verification of webhook deliveries.

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, WebhookError};
use crate::headers::{HeaderSource, SignedHeaders};
use crate::key::SigningKey;
use crate::profile::HeaderProfile;
use crate::signature::{SIGNATURE_VERSION, Signer, constant_time_eq, split_token};

/// Maximum accepted clock skew between signer and verifier, in seconds.
pub const TOLERANCE_SECS: u64 = 300;

/// A configured signer/verifier bound to one key and one header profile.
///
/// Immutable once built; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Webhook<C = SystemClock> {
    signer: Signer,
    profile: HeaderProfile,
    clock: C,
}

impl Webhook {
    /// Build from a base64 secret, with or without the `whsec_` prefix.
    pub fn new(secret: &str) -> Result<Self> {
        Self::from_key(&SigningKey::from_secret(secret)?)
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        Self::from_key(&SigningKey::from_bytes(bytes)?)
    }

    pub fn from_key(key: &SigningKey) -> Result<Self> {
        Ok(Self {
            signer: Signer::new(key)?,
            profile: HeaderProfile::STANDARD,
            clock: SystemClock,
        })
    }
}

impl<C: Clock> Webhook<C> {
    #[must_use]
    pub fn with_profile(mut self, profile: HeaderProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_clock<D: Clock>(self, clock: D) -> Webhook<D> {
        Webhook {
            signer: self.signer,
            profile: self.profile,
            clock,
        }
    }

    pub fn profile(&self) -> &HeaderProfile {
        &self.profile
    }

    /// Compute the `v1,<base64>` token for a delivery.
    pub fn sign(&self, msg_id: &str, timestamp: u64, payload: &[u8]) -> String {
        self.signer.sign(msg_id, timestamp, payload)
    }

    /// Sign and package the three outbound headers under this profile.
    pub fn signed_headers(&self, msg_id: &str, timestamp: u64, payload: &[u8]) -> SignedHeaders {
        let signature = self.sign(msg_id, timestamp, payload);
        SignedHeaders::new(&self.profile, msg_id, timestamp, signature)
    }

    /// Like [`Webhook::signed_headers`], stamped with the clock's current time.
    pub fn sign_now(&self, msg_id: &str, payload: &[u8]) -> SignedHeaders {
        self.signed_headers(msg_id, self.clock.now(), payload)
    }

    /// Verify an inbound delivery against its headers.
    pub fn verify<H: HeaderSource + ?Sized>(&self, payload: &[u8], headers: &H) -> Result<()> {
        self.verify_inner(payload, headers, true)
    }

    /// Verify the signature but skip the tolerance window check.
    ///
    /// The timestamp header must still be present and numeric since it is
    /// part of the signed content.
    pub fn verify_ignoring_timestamp<H: HeaderSource + ?Sized>(
        &self,
        payload: &[u8],
        headers: &H,
    ) -> Result<()> {
        self.verify_inner(payload, headers, false)
    }

    fn verify_inner<H: HeaderSource + ?Sized>(
        &self,
        payload: &[u8],
        headers: &H,
        enforce_tolerance: bool,
    ) -> Result<()> {
        let msg_id = required_header(headers, &self.profile.id)?;
        let signatures = required_header(headers, &self.profile.signature)?;
        let timestamp_raw = required_header(headers, &self.profile.timestamp)?;

        let timestamp = parse_timestamp(timestamp_raw)?;
        if enforce_tolerance {
            check_tolerance(timestamp, self.clock.now())?;
        }

        let expected = self.signer.encoded_digest(msg_id, timestamp, payload);
        match_candidates(&expected, signatures).inspect_err(|error| {
            tracing::debug!(msg_id, kind = %error.kind(), "webhook signature rejected");
        })
    }
}

fn required_header<'h, H: HeaderSource + ?Sized>(headers: &'h H, name: &str) -> Result<&'h str> {
    match headers.header(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => {
            tracing::debug!(header = name, "webhook header missing");
            Err(WebhookError::MissingHeader {
                header: name.to_string(),
            })
        }
    }
}

/// Digits only: `u64::from_str` would also take a leading `+`.
fn parse_timestamp(value: &str) -> Result<u64> {
    let invalid = || {
        tracing::debug!(value, "webhook timestamp is not an integer");
        WebhookError::InvalidTimestamp {
            value: value.to_string(),
        }
    };
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse().map_err(|_| invalid())
}

fn check_tolerance(timestamp: u64, now: u64) -> Result<()> {
    if timestamp < now.saturating_sub(TOLERANCE_SECS) {
        tracing::debug!(timestamp, now, "webhook timestamp too old");
        return Err(WebhookError::TimestampTooOld { timestamp, now });
    }
    if timestamp > now.saturating_add(TOLERANCE_SECS) {
        tracing::debug!(timestamp, now, "webhook timestamp too new");
        return Err(WebhookError::TimestampTooNew { timestamp, now });
    }
    Ok(())
}

/// First matching `v1` candidate wins; other versions are skipped.
fn match_candidates(expected_digest: &str, header_value: &str) -> Result<()> {
    for candidate in header_value.split(' ') {
        let Some((version, digest)) = split_token(candidate) else {
            return Err(WebhookError::MalformedSignature {
                token: candidate.to_string(),
            });
        };
        if version != SIGNATURE_VERSION {
            tracing::trace!(version, "skipping signature with unsupported version");
            continue;
        }
        if constant_time_eq(digest, expected_digest) {
            return Ok(());
        }
    }
    Err(WebhookError::NoMatchingSignature)
}
