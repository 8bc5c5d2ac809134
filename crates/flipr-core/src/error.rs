// ── Core error types ──
//
// User-facing errors from flipr-core. Consumers never see JSON parse
// failures or raw reqwest errors directly: the `From<flipr_api::Error>`
// impl translates transport-layer errors into these variants. There is
// no mapping error; survey mapping degrades to unknown readings instead.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Authentication errors ────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Request errors ───────────────────────────────────────────────
    #[error(
        "Request failed{}: {message}",
        .status.map_or_else(String::new, |s| format!(" (HTTP {s})"))
    )]
    Http {
        message: String,
        /// HTTP status code (absent for transport failures).
        status: Option<u16>,
    },

    #[error("Cannot connect to the Flipr cloud at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to the Flipr cloud timed out")]
    Timeout,

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<flipr_api::Error> for CoreError {
    fn from(err: flipr_api::Error) -> Self {
        match err {
            flipr_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            flipr_api::Error::Http { status, message } => CoreError::Http {
                message,
                status: Some(status),
            },
            flipr_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), |u| u.origin().ascii_serialization()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Http {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            flipr_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            flipr_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS setup failed: {msg}"),
            },
            flipr_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
