use thiserror::Error;

/// Top-level error type for the `flipr-api` crate.
///
/// Covers every failure mode of the cloud API: the password exchange,
/// transport, non-200 responses and undecodable bodies.
/// `flipr-core` maps these into user-facing errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The password exchange was rejected (any non-200 from `/OAuth2/token`).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── HTTP ────────────────────────────────────────────────────────
    /// An authenticated request answered with something other than 200 OK.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the credentials or the token were rejected.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Self::Authentication { .. } => true,
            Self::Http { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => matches!(status, 429 | 502 | 503 | 504),
            _ => false,
        }
    }

    /// HTTP status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Shorten a response body for inclusion in error messages.
pub(crate) fn body_preview(body: &str) -> String {
    const MAX_CHARS: usize = 200;
    if body.chars().count() <= MAX_CHARS {
        body.to_owned()
    } else {
        let mut preview: String = body.chars().take(MAX_CHARS).collect();
        preview.push('…');
        preview
    }
}
