// Flipr cloud HTTP client
//
// Wraps `reqwest::Client` with base-URL handling, the bearer-token session,
// and strict status checking. Authentication lives in `auth.rs`, endpoint
// helpers in `survey.rs`, both as inherent methods on `FliprClient`.

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

use crate::error::{Error, body_preview};
use crate::session::{Session, SessionState};
use crate::transport::TransportConfig;

/// Production endpoint of the Flipr cloud API.
pub const DEFAULT_BASE_URL: &str = "https://apis.goflipr.com";

/// Raw HTTP client for the Flipr cloud API.
///
/// Owns the account credentials and the token session. Every request goes
/// through [`ensure_valid_session`](Self::ensure_valid_session) first, so
/// callers never handle tokens themselves. The session sits behind an async
/// mutex held across check-and-refresh: concurrent callers on one client
/// share a single password exchange.
pub struct FliprClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
    pub(crate) session: Mutex<Session>,
}

impl FliprClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// No request is made here; the first call authenticates lazily.
    pub fn new(
        base_url: Url,
        username: String,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, username, password))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        username: String,
        password: SecretString,
    ) -> Self {
        Self {
            http,
            base_url,
            username,
            password,
            session: Mutex::new(Session::new()),
        }
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The account this client authenticates as.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &SecretString {
        &self.password
    }

    /// Current position in the session state machine.
    pub async fn session_state(&self) -> SessionState {
        self.session.lock().await.state_at(chrono::Utc::now())
    }

    /// Forget the current token; the next request authenticates again.
    pub async fn invalidate_session(&self) {
        debug!("invalidating session");
        self.session.lock().await.invalidate();
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}{path}`.
    ///
    /// Concatenates rather than `Url::join`s so a base URL with a path
    /// prefix (reverse proxies, mock servers) keeps that prefix.
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Authenticated GET returning the decoded JSON body.
    ///
    /// Checks in order: transport failure, then status (anything but
    /// exactly 200 is an [`Error::Http`], even with a JSON body), then
    /// the body itself.
    pub async fn get_json(&self, path: &str) -> Result<Value, Error> {
        let token = self.bearer_token().await?;
        let url = self.endpoint_url(path)?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_owned()
                } else {
                    body_preview(&body)
                },
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", body_preview(&body)),
            body,
        })
    }

    /// Authenticated GET decoded into `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let value = self.get_json(path).await?;
        serde_json::from_value(value).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: String::new(),
        })
    }
}
