//! TOML configuration for a signer/verifier.

use crate::error::ConfigError;
use crate::profile::{HeaderProfile, ProfilePreset};
use crate::verify::Webhook;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the configured secret when set.
pub const SECRET_ENV: &str = "STANDARD_WEBHOOKS_SECRET";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Base64 secret, optionally `whsec_`-prefixed
    #[serde(default)]
    pub secret: Option<String>,
    /// Built-in header preset (default: standard)
    #[serde(default)]
    pub profile: ProfilePreset,
    /// Explicit header names; takes precedence over `profile`
    #[serde(default)]
    pub headers: Option<CustomHeaders>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomHeaders {
    pub id: String,
    pub signature: String,
    pub timestamp: String,
}

impl WebhookConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(
            path = %path.display(),
            profile = %config.profile,
            "loaded webhook config"
        );
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Fill the secret from [`SECRET_ENV`] when it is set and non-empty.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_secret_from_env(SECRET_ENV)
    }

    fn with_secret_from_env(mut self, key: &str) -> Self {
        if let Ok(secret) = std::env::var(key)
            && !secret.is_empty()
        {
            tracing::debug!(key, "webhook secret taken from environment");
            self.secret = Some(secret);
        }
        self
    }

    pub fn header_profile(&self) -> HeaderProfile {
        match &self.headers {
            Some(custom) => HeaderProfile::new(
                custom.id.clone(),
                custom.signature.clone(),
                custom.timestamp.clone(),
            ),
            None => self.profile.profile().clone(),
        }
    }

    pub fn build(&self) -> Result<Webhook, ConfigError> {
        let secret = self.secret.as_deref().ok_or(ConfigError::MissingSecret)?;
        Ok(Webhook::new(secret)?.with_profile(self.header_profile()))
    }
}

/// `<config dir>/standard-webhooks/config.toml` for the current user.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "standard-webhooks")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
