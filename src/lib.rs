#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::len_without_is_empty,
    clippy::return_self_not_must_use
)]

//! Standard Webhooks signing and verification.
//!
//! ```
//! use standard_webhooks::Webhook;
//!
//! let webhook = Webhook::new("whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw")?;
//! let payload = br#"{"test": 2432232314}"#;
//! let headers = webhook.sign_now("msg_p5jXN8AQM9LWM0D4loKWxJek", payload);
//! webhook.verify(payload, &headers)?;
//! # Ok::<(), standard_webhooks::WebhookError>(())
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod headers;
pub mod key;
pub mod profile;
pub mod signature;
pub mod verify;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::WebhookConfig;
pub use error::{ConfigError, ErrorKind, WebhookError};
pub use headers::{HeaderSource, SignedHeaders};
pub use key::SigningKey;
pub use profile::{HeaderProfile, ProfilePreset};
pub use verify::{TOLERANCE_SECS, Webhook};
