use thiserror::Error;

// ─── Verification / signing errors ───────────────────────────────────────────

/// Failure of a single sign or verify call.
///
/// Every variant is terminal for the call that produced it. The crate keeps
/// no state between calls, so retrying is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    #[error("invalid signing key: {0}")]
    InvalidKey(String),

    #[error("missing required header `{header}`")]
    MissingHeader { header: String },

    #[error("invalid timestamp header value `{value}`")]
    InvalidTimestamp { value: String },

    #[error("message timestamp {timestamp} is too old (now {now})")]
    TimestampTooOld { timestamp: u64, now: u64 },

    #[error("message timestamp {timestamp} is too far in the future (now {now})")]
    TimestampTooNew { timestamp: u64, now: u64 },

    #[error("malformed signature token `{token}`: expected `<version>,<digest>`")]
    MalformedSignature { token: String },

    #[error("no matching signature found")]
    NoMatchingSignature,
}

/// Payload-free discriminant of [`WebhookError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    InvalidKey,
    MissingHeader,
    InvalidTimestamp,
    TimestampTooOld,
    TimestampTooNew,
    MalformedSignature,
    NoMatchingSignature,
}

impl WebhookError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidKey(_) => ErrorKind::InvalidKey,
            Self::MissingHeader { .. } => ErrorKind::MissingHeader,
            Self::InvalidTimestamp { .. } => ErrorKind::InvalidTimestamp,
            Self::TimestampTooOld { .. } => ErrorKind::TimestampTooOld,
            Self::TimestampTooNew { .. } => ErrorKind::TimestampTooNew,
            Self::MalformedSignature { .. } => ErrorKind::MalformedSignature,
            Self::NoMatchingSignature => ErrorKind::NoMatchingSignature,
        }
    }
}

pub type Result<T, E = WebhookError> = std::result::Result<T, E>;

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no signing secret configured")]
    MissingSecret,

    #[error("unknown header profile `{0}` (expected `standard` or `legacy`)")]
    UnknownProfile(String),

    #[error(transparent)]
    Key(#[from] WebhookError),
}
