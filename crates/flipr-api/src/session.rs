// Bearer-token session state
//
// Holds the access token from the password exchange and the instant it
// stops being usable. There is no logout endpoint: a session simply
// expires and the next request authenticates again.

use chrono::{DateTime, TimeDelta, Utc};
use secrecy::SecretString;

/// Observable authentication state of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No token, or the token has expired.
    Unauthenticated,
    /// A token is held and usable until `expires_at`.
    Authenticated { expires_at: DateTime<Utc> },
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

/// Token and expiry pair owned by a [`FliprClient`](crate::FliprClient).
#[derive(Debug, Default)]
pub struct Session {
    token: Option<SecretString>,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// An empty session; the first request will authenticate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly issued token valid for `expires_in_secs` from `now`.
    ///
    /// A negative lifetime yields an already expired session.
    pub fn store(&mut self, token: SecretString, expires_in_secs: i64, now: DateTime<Utc>) {
        let expires_at = TimeDelta::try_seconds(expires_in_secs)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .unwrap_or(if expires_in_secs < 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            });
        self.token = Some(token);
        self.expires_at = Some(expires_at);
    }

    /// Drop the token so the next request authenticates again.
    pub fn invalidate(&mut self) {
        self.token = None;
        self.expires_at = None;
    }

    /// The token, if present and strictly before its expiry at `now`.
    pub fn valid_token_at(&self, now: DateTime<Utc>) -> Option<&SecretString> {
        match (&self.token, self.expires_at) {
            (Some(token), Some(expires_at)) if now < expires_at => Some(token),
            _ => None,
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_token_at(now).is_some()
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> SessionState {
        match self.expires_at {
            Some(expires_at) if self.is_valid_at(now) => SessionState::Authenticated { expires_at },
            _ => SessionState::Unauthenticated,
        }
    }
}
