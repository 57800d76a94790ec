//! Header-name profiles.
//!
//! A profile maps the three logical roles of a delivery (message id,
//! signature, timestamp) onto concrete header names.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeaderProfile {
    pub id: Cow<'static, str>,
    pub signature: Cow<'static, str>,
    pub timestamp: Cow<'static, str>,
}

impl HeaderProfile {
    /// `webhook-id` / `webhook-signature` / `webhook-timestamp`
    pub const STANDARD: Self = Self {
        id: Cow::Borrowed("webhook-id"),
        signature: Cow::Borrowed("webhook-signature"),
        timestamp: Cow::Borrowed("webhook-timestamp"),
    };

    /// `Svix-Id` / `Svix-Signature` / `Svix-Timestamp`
    pub const LEGACY: Self = Self {
        id: Cow::Borrowed("Svix-Id"),
        signature: Cow::Borrowed("Svix-Signature"),
        timestamp: Cow::Borrowed("Svix-Timestamp"),
    };

    pub fn new(
        id: impl Into<String>,
        signature: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: Cow::Owned(id.into()),
            signature: Cow::Owned(signature.into()),
            timestamp: Cow::Owned(timestamp.into()),
        }
    }

    pub fn standard() -> &'static Self {
        &STANDARD_PROFILE
    }

    pub fn legacy() -> &'static Self {
        &LEGACY_PROFILE
    }
}

static STANDARD_PROFILE: HeaderProfile = HeaderProfile::STANDARD;
static LEGACY_PROFILE: HeaderProfile = HeaderProfile::LEGACY;

impl Default for HeaderProfile {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Named built-in profile, as written in config files and on the command line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProfilePreset {
    #[default]
    Standard,
    #[strum(to_string = "legacy", serialize = "svix")]
    #[serde(alias = "svix")]
    Legacy,
}

impl ProfilePreset {
    pub fn profile(self) -> &'static HeaderProfile {
        match self {
            Self::Standard => HeaderProfile::standard(),
            Self::Legacy => HeaderProfile::legacy(),
        }
    }

    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        Self::from_str(&name.to_ascii_lowercase())
            .map_err(|_| ConfigError::UnknownProfile(name.to_string()))
    }
}
